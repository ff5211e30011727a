//! Integration tests for pixlab crates.
//!
//! End-to-end checks that cross crate boundaries: engine properties, file
//! round trips through the codecs, and scripts driven through the dispatcher.

#[cfg(test)]
mod golden;

#[cfg(test)]
mod tests {
    use std::fs;

    use pixlab_cli::{Session, Status};
    use pixlab_core::PixelBuffer;
    use pixlab_ops::color::{Component, extract_component, rgb_combine};
    use pixlab_ops::{Levels, Split, correct, levels, transform, wavelet};
    use tempfile::tempdir;

    /// Deterministic test card with every channel varying.
    fn card(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            [
                (x * 37 + y * 11) as u8,
                (x * 5 + y * 53 + 20) as u8,
                (x * y * 7 + 3) as u8,
            ]
        })
    }

    #[test]
    fn test_flips_are_involutions() {
        let img = card(7, 4);
        assert_eq!(transform::flip_h(&transform::flip_h(&img)), img);
        assert_eq!(transform::flip_v(&transform::flip_v(&img)), img);
        assert_ne!(transform::flip_h(&img), img);
    }

    #[test]
    fn test_components_recombine() {
        let img = card(9, 5);
        let r = extract_component(&img, Component::Red, Split::NONE);
        let g = extract_component(&img, Component::Green, Split::NONE);
        let b = extract_component(&img, Component::Blue, Split::NONE);
        let combined = rgb_combine(&r, &g, &b);
        assert!(combined.mismatch.is_none());
        assert_eq!(combined.image, img);
    }

    #[test]
    fn test_levels_identity() {
        let img = card(16, 16);
        let identity = Levels::new(0, 128, 255).unwrap();
        assert_eq!(levels::adjust_levels(&img, identity, Split::NONE), img);
    }

    #[test]
    fn test_compress_extremes() {
        for (w, h) in [(5, 3), (8, 8), (1, 7), (13, 2)] {
            let img = card(w, h);
            let kept = wavelet::compress(&img, 0.0).unwrap();
            for ((_, _, a), (_, _, b)) in kept.pixels().zip(img.pixels()) {
                for c in 0..3 {
                    assert!((a[c] as i32 - b[c] as i32).abs() <= 1, "{}x{}", w, h);
                }
            }
            let dropped = wavelet::compress(&img, 100.0).unwrap();
            assert_eq!(dropped.dimensions(), (w, h));
            assert!(dropped.pixels().all(|(_, _, px)| px == [0, 0, 0]));
        }
    }

    #[test]
    fn test_color_correct_with_aligned_peaks() {
        // Every channel has the same distribution, so the peaks coincide.
        let img = PixelBuffer::from_fn(4, 4, |x, _| {
            let v = (x * 40 + 20) as u8;
            [v, v, v]
        });
        assert_eq!(correct::color_correct(&img, Split::NONE).unwrap(), img);
    }

    #[test]
    fn test_ppm_file_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.ppm");
        pixlab_io::write(&path, &crate::golden::quad()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "P3\n2 2\n255\n255 0 0 0 255 0 \n0 0 255 255 255 255 \n"
        );
        assert_eq!(pixlab_io::read(&path).unwrap(), crate::golden::quad());
    }

    #[test]
    fn test_script_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("quad.ppm");
        pixlab_io::write(&input, &crate::golden::quad()).unwrap();

        let script = dir.path().join("edit.txt");
        fs::write(
            &script,
            format!(
                "# flip, brighten, save twice\n\
                 load '{dir}/quad.ppm' q\n\
                 vertical-flip q flipped\n\
                 \n\
                 brighten 50 q bright\n\
                 save '{dir}/flipped.ppm' flipped\n\
                 save '{dir}/bright.png' bright\n\
                 blur missing nowhere\n",
                dir = dir.path().display()
            ),
        )
        .unwrap();

        let mut session = Session::new();
        let mut statuses = Vec::new();
        let report = session
            .run_script_with(&script, |_, _, status| statuses.push(status.clone()))
            .unwrap();
        assert_eq!(report.executed, 6);
        assert_eq!(report.failed, 1);
        assert_eq!(statuses[..5], [Status::Success, Status::Success, Status::Success, Status::Success, Status::Success]);

        let flipped = pixlab_io::read(dir.path().join("flipped.ppm")).unwrap();
        assert_eq!(flipped, crate::golden::quad_flipped());
        let bright = pixlab_io::read(dir.path().join("bright.png")).unwrap();
        assert_eq!(bright, crate::golden::quad_brightened());
    }

    #[test]
    fn test_session_survives_failures() {
        let mut session = Session::new();
        assert!(!session.execute("load '/definitely/not/here.ppm' x").is_ok());
        assert!(!session.execute("compress -5 x y").is_ok());
        session.store_mut().put("x", card(3, 3));
        assert_eq!(session.execute("compress 50 x y"), Status::Success);
        assert_eq!(session.store().names(), ["x", "y"]);
    }
}
