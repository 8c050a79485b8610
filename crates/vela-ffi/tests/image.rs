//! `vela_image_*` calls through the C entry points.

mod common;

use common::{assert_close, create, create_with, destroy_all, dims, host};
use vela_ffi::diagnostics::vela_last_error;
use vela_ffi::image::*;
use vela_ffi::ErrorKind;

fn ramp(d0: i32, d1: i32) -> u64 {
    let data: Vec<f32> = (0..d0 * d1).map(|v| v as f32).collect();
    create_with([d0, d1, 1], &data)
}

#[test]
fn test_convolve_identity_filter() {
    let a = ramp(4, 4);
    let f = create_with([3, 3, 1], &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    let r = vela_image_convolve(a, f);
    assert_ne!(r, 0);
    assert_eq!(host(r), host(a));
    destroy_all(&[a, f, r]);
}

#[test]
fn test_erode_dilate_bounds() {
    let a = create_with([3, 3, 1], &[5.0, 5.0, 5.0, 5.0, 1.0, 5.0, 5.0, 5.0, 9.0]);
    let mask = create_with([3, 3, 1], &[1.0; 9]);
    let e = vela_image_erode(a, mask);
    let d = vela_image_dilate(a, mask);
    let (ev, dv, av) = (host(e).unwrap(), host(d).unwrap(), host(a).unwrap());
    for i in 0..9 {
        assert!(ev[i] <= av[i] && av[i] <= dv[i]);
    }
    // centre sees the whole image
    assert_eq!(ev[4], 1.0);
    assert_eq!(dv[4], 9.0);
    destroy_all(&[a, mask, e, d]);
}

#[test]
fn test_medfilt_removes_spike() {
    let mut data = vec![2.0f32; 25];
    data[12] = 100.0;
    let a = create_with([5, 5, 1], &data);
    let r = vela_image_medfilt(a, 3, 3);
    assert_eq!(host(r).unwrap()[12], 2.0);
    destroy_all(&[a, r]);
}

#[test]
fn test_smoothing_filters_keep_flat_image() {
    let a = create_with([6, 6, 1], &[0.5; 36]);
    let b = vela_image_bilateral(a, 1.5, 0.2);
    let m = vela_image_meanshift(a, 1.5, 0.2, 5);
    assert_close(&host(b).unwrap(), &[0.5; 36], 1e-5);
    assert_close(&host(m).unwrap(), &[0.5; 36], 1e-5);
    destroy_all(&[a, b, m]);
}

#[test]
fn test_oversized_windows_finish() {
    let a = create_with([6, 6, 1], &[0.5; 36]);
    let b = vela_image_bilateral(a, 1e30, 0.2);
    let m = vela_image_meanshift(a, 1e30, 0.2, 2);
    assert_close(&host(b).unwrap(), &[0.5; 36], 1e-5);
    assert_close(&host(m).unwrap(), &[0.5; 36], 1e-5);
    let r = vela_image_medfilt(a, i32::MAX, i32::MAX);
    assert_eq!(host(r).unwrap(), vec![0.0; 36]);
    destroy_all(&[a, b, m, r]);
}

#[test]
fn test_oversized_resize_fails() {
    let a = create([2, 2, 1]);
    assert_eq!(vela_image_resize3(a, 1 << 30, 1 << 30, 0), 0);
    assert_eq!(vela_last_error(), ErrorKind::Library.code());
    destroy_all(&[a]);
}

#[test]
fn test_histograms() {
    let a = create_with([4, 1, 1], &[0.0, 1.0, 2.0, 3.0]);
    let h = vela_image_histogram(a, 4);
    assert_eq!(dims(h), Some([4, 1, 1]));
    assert_eq!(host(h).unwrap(), vec![1.0, 1.0, 1.0, 1.0]);

    let hm = vela_image_hist_mnmx(a, 2, 0.0, 4.0);
    assert_eq!(host(hm).unwrap(), vec![2.0, 2.0]);

    assert_eq!(vela_image_histogram(a, 0), 0);
    assert_eq!(vela_last_error(), ErrorKind::InvalidArgument.code());
    destroy_all(&[a, h, hm]);
}

#[test]
fn test_rotate_crop_keeps_size() {
    let a = ramp(5, 3);
    let r = vela_image_rotate(a, 0.3, true);
    assert_eq!(dims(r), Some([5, 3, 1]));
    let u = vela_image_rotate(a, std::f32::consts::FRAC_PI_2, false);
    assert_eq!(dims(u), Some([3, 5, 1]));
    destroy_all(&[a, r, u]);
}

#[test]
fn test_resize_variants() {
    let a = create([4, 6, 2]);
    let r1 = vela_image_resize1(a, 0.5, 0);
    let r2 = vela_image_resize2(a, 2.0, 0.5, 2);
    let r3 = vela_image_resize3(a, 3, 7, 1);
    assert_eq!(dims(r1), Some([2, 3, 2]));
    assert_eq!(dims(r2), Some([8, 3, 2]));
    assert_eq!(dims(r3), Some([3, 7, 2]));

    assert_eq!(vela_image_resize1(a, 0.5, 7), 0);
    assert_eq!(vela_last_error(), ErrorKind::InvalidArgument.code());
    assert_eq!(vela_image_resize3(a, -1, 2, 0), 0);
    destroy_all(&[a, r1, r2, r3]);
}

#[test]
fn test_stale_mask() {
    let a = ramp(3, 3);
    let mask = create([3, 3, 1]);
    common::destroy_all(&[mask]);
    assert_eq!(vela_image_erode(a, mask), 0);
    assert_eq!(vela_last_error(), ErrorKind::StaleHandle.code());
    destroy_all(&[a]);
}
