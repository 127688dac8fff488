#![allow(clippy::float_cmp)]

#[cfg(test)]
mod fixtures {
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};

    /// Black rectangle on white, in pixel coordinates
    pub fn write_glyph_image(dir: &Path, name: &str, ink: (u32, u32, u32, u32)) -> PathBuf {
        let (x0, y0, x1, y1) = ink;
        let image = RgbaImage::from_fn(40, 40, |x, y| {
            if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let path = dir.join(format!("{name}.png"));
        image.save(&path).unwrap();
        path
    }

    pub fn write_charmap(dir: &Path, entries: &[(&str, &Path)]) -> PathBuf {
        let mappings: Vec<_> = entries
            .iter()
            .map(|(ch, path)| serde_json::json!({ "char": ch, "path": path }))
            .collect();
        let path = dir.join("charmap.json");
        std::fs::write(&path, serde_json::to_string(&mappings).unwrap()).unwrap();
        path
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::fixtures::{write_charmap, write_glyph_image};
    use crate::compile::OutputFormat;
    use crate::core::config_file::Settings;
    use crate::core::runner::{generate_font, prepare_font, GenerationRequest};
    use crate::spacing::SpacingStrategy;
    use std::path::{Path, PathBuf};

    fn request(dir: &Path, charmap: PathBuf, adjustments: Option<PathBuf>) -> GenerationRequest {
        GenerationRequest {
            charmap_file: charmap,
            output_file: dir.join("out").join("TestFont"),
            font_name: "Test Font".to_string(),
            format: OutputFormat::Ttf,
            adjustments_file: adjustments,
            spacing: SpacingStrategy::Dynamic,
            keep_ufo: None,
        }
    }

    #[test]
    fn test_missing_images_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_glyph_image(dir.path(), "A", (8, 4, 32, 36));
        let missing = dir.path().join("B.png");
        let charmap = write_charmap(dir.path(), &[("A", &a), ("B", &missing)]);

        let prepared = prepare_font(&request(dir.path(), charmap, None), &Settings::default()).unwrap();

        assert_eq!(prepared.glyph_set.skipped, vec!['B']);
        let chars: Vec<char> = prepared.glyph_set.glyphs.iter().map(|g| g.ch).collect();
        assert_eq!(chars, vec!['A', ' ']);
        assert!(prepared.glyph_set.glyphs[0].has_outline());

        let layer = prepared.font.default_layer();
        assert!(layer.get_glyph("A").is_some());
        assert!(layer.get_glyph("B").is_none());
        assert!(layer.get_glyph("space").is_some());
    }

    #[test]
    fn test_undecodable_image_keeps_empty_glyph() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a png").unwrap();
        let charmap = write_charmap(dir.path(), &[("a", &broken)]);

        let prepared = prepare_font(&request(dir.path(), charmap, None), &Settings::default()).unwrap();

        assert_eq!(prepared.glyph_set.failed, vec!['a']);
        let glyph = &prepared.glyph_set.glyphs[0];
        assert!(!glyph.has_outline());
        assert!(glyph.width > 0.0);
    }

    #[test]
    fn test_letter_spacing_widens_every_glyph() {
        let dir = tempfile::tempdir().unwrap();
        let n = write_glyph_image(dir.path(), "n", (10, 10, 30, 36));
        let o = write_glyph_image(dir.path(), "o", (8, 10, 32, 36));
        let charmap = write_charmap(dir.path(), &[("n", &n), ("o", &o)]);
        let adjustments = dir.path().join("adjustments.json");
        std::fs::write(&adjustments, r#"{"letterSpacing": 1}"#).unwrap();

        let settings = Settings::default();
        let plain = prepare_font(&request(dir.path(), charmap.clone(), None), &settings).unwrap();
        let spaced =
            prepare_font(&request(dir.path(), charmap, Some(adjustments)), &settings).unwrap();

        for (before, after) in plain.glyph_set.glyphs.iter().zip(&spaced.glyph_set.glyphs) {
            if before.ch == ' ' {
                assert_eq!(before.width, after.width);
            } else {
                assert_eq!(after.width - before.width, 20.0, "glyph '{}'", before.ch);
            }
        }
    }

    #[test]
    fn test_position_entry_replaces_baseline_offset() {
        let dir = tempfile::tempdir().unwrap();
        let x = write_glyph_image(dir.path(), "x", (10, 10, 30, 36));
        let z = write_glyph_image(dir.path(), "z", (10, 10, 30, 36));
        let charmap = write_charmap(dir.path(), &[("x", &x), ("z", &z)]);
        let adjustments = dir.path().join("adjustments.json");
        std::fs::write(
            &adjustments,
            r#"{"baselineOffset": 1, "charPositions": {"z": {"y": "-1"}}}"#,
        )
        .unwrap();

        let settings = Settings::default();
        let plain = prepare_font(&request(dir.path(), charmap.clone(), None), &settings).unwrap();
        let moved =
            prepare_font(&request(dir.path(), charmap, Some(adjustments)), &settings).unwrap();

        let y0 = |set: &crate::core::runner::PreparedFont, i: usize| {
            set.glyph_set.glyphs[i].bounding_box().unwrap().y0
        };
        assert_eq!(y0(&moved, 0) - y0(&plain, 0), 40.0);
        assert_eq!(y0(&moved, 1) - y0(&plain, 1), -40.0);
    }

    #[tokio::test]
    async fn test_keep_ufo_survives_failed_compile() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_glyph_image(dir.path(), "A", (8, 4, 32, 36));
        let charmap = write_charmap(dir.path(), &[("A", &a)]);
        let ufo_dir = dir.path().join("ufo");

        let mut request = request(dir.path(), charmap, None);
        request.keep_ufo = Some(ufo_dir.clone());
        let settings = Settings::resolve(None, Some(PathBuf::from("/nonexistent/fontc")), false);

        assert!(generate_font(&request, &settings).await.is_err());
        assert!(ufo_dir.join("TestFont.ufo").join("metainfo.plist").exists());
        assert!(!request.output_path().exists());
    }

    #[tokio::test]
    #[ignore = "Requires the fontc binary on PATH"]
    async fn test_generates_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_glyph_image(dir.path(), "A", (8, 4, 32, 36));
        let o = write_glyph_image(dir.path(), "O", (6, 4, 34, 36));
        let charmap = write_charmap(dir.path(), &[("A", &a), ("O", &o)]);

        for format in [OutputFormat::Ttf, OutputFormat::Woff, OutputFormat::Woff2] {
            let mut request = request(dir.path(), charmap.clone(), None);
            request.format = format;
            let report = generate_font(&request, &Settings::default()).await.unwrap();

            assert!(report.output_path.exists());
            assert!(report.size > 0);
            assert_eq!(report.glyph_count, 3);
        }
    }
}
