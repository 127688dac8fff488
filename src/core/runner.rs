//! Font generation runner
//!
//! Loads the inputs, builds and spaces every glyph, kerns, and hands the
//! assembled UFO to the compiler. Building is synchronous and free of
//! external tools; only the final compile step shells out.

use crate::compile::{AutoHinter, FontCompiler, OutputFormat};
use crate::core::cli::CliArgs;
use crate::core::config_file::{ConfigFile, Settings};
use crate::data::adjustments::{AdjustmentFactors, Adjustments, POSITION_X_FACTOR};
use crate::data::charmap::CharMap;
use crate::data::ufo::{self, FontNames};
use crate::font_source::{GlyphBuild, TYPEFACE_METRICS};
use crate::logging;
use crate::outline::{import_outline, TraceOptions};
use crate::spacing::kerning::{apply_user_pairs, retain_present};
use crate::spacing::{
    apply_overshoot, apply_side_bearings, default_kerning_pairs, dynamic_i_kerning,
    initial_advance, width_class, KerningTable, SpacingStrategy,
};
use anyhow::{Context, Result};
use chrono::Datelike;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Everything one generation run needs from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub charmap_file: PathBuf,
    pub output_file: PathBuf,
    pub font_name: String,
    pub format: OutputFormat,
    pub adjustments_file: Option<PathBuf>,
    pub spacing: SpacingStrategy,
    pub keep_ufo: Option<PathBuf>,
}

impl From<&CliArgs> for GenerationRequest {
    fn from(args: &CliArgs) -> Self {
        Self {
            charmap_file: args.charmap_file.clone(),
            output_file: args.output_file.clone(),
            font_name: args.font_name.clone(),
            format: args.format,
            adjustments_file: args.adjustments_file.clone(),
            spacing: args.spacing,
            keep_ufo: args.keep_ufo.clone(),
        }
    }
}

impl GenerationRequest {
    pub fn output_path(&self) -> PathBuf {
        self.format.output_path(&self.output_file)
    }
}

/// Glyphs after both passes
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    pub glyphs: Vec<GlyphBuild>,
    /// Characters whose image could not be found
    pub skipped: Vec<char>,
    /// Characters whose image failed to import; their glyphs are kept
    pub failed: Vec<char>,
}

/// A font ready to be compiled
pub struct PreparedFont {
    pub names: FontNames,
    pub glyph_set: GlyphSet,
    pub kerning: KerningTable,
    pub font: norad::Font,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub size: usize,
    pub glyph_count: usize,
    pub kerning_pairs: usize,
    pub skipped: Vec<char>,
    pub failed: Vec<char>,
}

/// Create glyphs for every resolvable mapping and apply all per-glyph
/// adjustments
pub fn build_glyphs(
    charmap: &CharMap,
    adjustments: &Adjustments,
    trace: &TraceOptions,
    spacing: SpacingStrategy,
) -> GlyphSet {
    let factors = adjustments.factors();
    let mut set = GlyphSet::default();
    let mut sources = Vec::new();

    // First pass: create every glyph with its class width
    for entry in charmap.iter() {
        let Some(path) = charmap.resolve_image(entry) else {
            warn!("Image for '{}' not found at {}", entry.ch, entry.path.display());
            set.skipped.push(entry.ch);
            continue;
        };
        let width = initial_advance(entry.ch, factors.width_scale);
        debug!(
            "Created '{}' ({}) with width {}",
            entry.ch,
            width_class(entry.ch).as_str(),
            width
        );
        set.glyphs.push(GlyphBuild::new(entry.ch, width));
        sources.push(path);
    }

    // Second pass: import outlines and apply adjustments
    for (glyph, path) in set.glyphs.iter_mut().zip(&sources) {
        match import_glyph(glyph, path, trace, spacing) {
            Ok(()) => {
                apply_positioning(glyph, adjustments, &factors);
                info!("Successfully imported '{}' from {}", glyph.ch, path.display());
            }
            Err(err) => {
                error!("Error importing '{}' from {}: {:#}", glyph.ch, path.display(), err);
                set.failed.push(glyph.ch);
            }
        }
    }

    set
}

fn import_glyph(
    glyph: &mut GlyphBuild,
    path: &Path,
    trace: &TraceOptions,
    spacing: SpacingStrategy,
) -> Result<()> {
    glyph.clear();
    glyph.contours = import_outline(path, trace)?;
    glyph.round();

    if apply_overshoot(glyph) {
        debug!("Applied overshoot to '{}'", glyph.ch);
    }
    apply_side_bearings(glyph, spacing);
    Ok(())
}

/// Per-character position when one is given, otherwise the global
/// baseline offset; then width scaling and letter spacing.
///
/// A position entry with only `y` leaves the advance untouched.
pub fn apply_positioning(
    glyph: &mut GlyphBuild,
    adjustments: &Adjustments,
    factors: &AdjustmentFactors,
) {
    let spacing_units = adjustments.spacing_units();

    if let Some(position) = adjustments.position_for(glyph.ch) {
        info!(
            "Found custom position for '{}': x={}, y={}",
            glyph.ch,
            position.x.unwrap_or(0.0),
            position.y.unwrap_or(0.0)
        );

        if let Some(y) = position.y {
            let y_adjust = y * factors.position;
            debug!("Vertical adjustment for '{}': {}", glyph.ch, y_adjust);
            glyph.translate(0.0, y_adjust);
        }

        if let Some(x) = position.x {
            let x_adjust = x * POSITION_X_FACTOR;
            debug!("Horizontal adjustment for '{}': {}", glyph.ch, x_adjust);
            if let Some(left) = glyph.left_side_bearing() {
                glyph.set_left_side_bearing(left + x_adjust.trunc());
            }
            glyph.width = (glyph.width * factors.width_scale).trunc() + spacing_units;
        }
    } else {
        if adjustments.baseline_offset != 0.0 {
            let vertical = adjustments.baseline_offset * factors.baseline_offset;
            glyph.translate(0.0, vertical);
            debug!("Baseline adjustment for '{}': {}", glyph.ch, vertical);
        }
        glyph.width = (glyph.width * factors.width_scale).trunc() + spacing_units;
        debug!("Character '{}': width={}", glyph.ch, glyph.width);
    }
}

/// Default pairs, then user pairs, then the measured `I` pairs, limited to
/// glyphs that exist
pub fn build_kerning(glyphs: &[GlyphBuild], adjustments: &Adjustments) -> KerningTable {
    let mut table = default_kerning_pairs();
    apply_user_pairs(&mut table, &adjustments.kerning_pairs, adjustments.factors().kerning);

    let dynamic = dynamic_i_kerning(glyphs);
    info!("Dynamic kerning for 'I' pairs: {} pairs", dynamic.len());
    table.extend(dynamic);

    retain_present(&table, glyphs)
}

/// Append a space glyph when the charmap has none
pub fn ensure_space(glyphs: &mut Vec<GlyphBuild>) -> bool {
    if glyphs.iter().any(|glyph| glyph.ch == ' ') {
        return false;
    }
    glyphs.push(GlyphBuild::new(' ', f64::from(TYPEFACE_METRICS.space_width())));
    info!("Added space character to font");
    true
}

fn log_adjustments(adjustments: &Adjustments) {
    let factors = adjustments.factors();
    info!(
        "Applied adjustments: letterSpacing={} (factor: {})",
        adjustments.letter_spacing, factors.letter_spacing
    );
    info!(
        "Applied adjustments: baselineOffset={} (factor: {})",
        adjustments.baseline_offset, factors.baseline_offset
    );
    info!("Applied adjustments: charWidth={}", factors.width_scale);
    info!(
        "Optical size: {}pt (factor: {})",
        adjustments.optical_size, factors.size_factor
    );

    if adjustments.char_positions.is_empty() {
        info!("No individual character positions defined");
    } else {
        info!("Character positions: {:?}", adjustments.char_positions);
    }
    if adjustments.kerning_pairs.is_empty() {
        info!("No kerning pairs defined");
    } else {
        info!("Kerning pairs: {:?}", adjustments.kerning_pairs);
    }
}

fn log_verification(adjustments: &Adjustments) {
    let factors = adjustments.factors();
    info!("=== VERIFICATION OF ADJUSTMENTS ===");
    if adjustments.letter_spacing != 0.0 {
        info!(
            "Letter spacing: {} * {} = {} units",
            adjustments.letter_spacing,
            factors.letter_spacing,
            adjustments.letter_spacing * factors.letter_spacing
        );
    }
    if adjustments.baseline_offset != 0.0 {
        info!(
            "Baseline offset: {} * {} = {} units",
            adjustments.baseline_offset,
            factors.baseline_offset,
            adjustments.baseline_offset * factors.baseline_offset
        );
    }
    if factors.width_scale != 1.0 {
        info!(
            "Character width: {}% (scaling factor {})",
            factors.width_scale * 100.0,
            factors.width_scale
        );
    }
    if !adjustments.kerning_pairs.is_empty() {
        info!(
            "Kerning pairs: {} pairs with factor {}",
            adjustments.kerning_pairs.len(),
            factors.kerning
        );
    }
    for (ch, position) in &adjustments.char_positions {
        info!(
            "  - '{}': x={}, y={} -> Vertical offset: {} units",
            ch,
            position.x.unwrap_or(0.0),
            position.y.unwrap_or(0.0),
            position.y.unwrap_or(0.0) * factors.position
        );
    }
}

/// Load inputs, build glyphs and kerning, and assemble the UFO
pub fn prepare_font(request: &GenerationRequest, settings: &Settings) -> Result<PreparedFont> {
    info!("=== FONT GENERATION STARTED ===");
    info!("Character map file: {}", request.charmap_file.display());
    info!("Output file: {}", request.output_path().display());
    info!("Font name: {}", request.font_name);

    let charmap = CharMap::load(&request.charmap_file)?;
    info!("Loaded {} character mappings", charmap.len());

    let adjustments = Adjustments::load(request.adjustments_file.as_deref())?;
    log_adjustments(&adjustments);

    let names = FontNames::new(&request.font_name, chrono::Local::now().year());

    let mut glyph_set = build_glyphs(&charmap, &adjustments, &settings.trace, request.spacing);
    let kerning = build_kerning(&glyph_set.glyphs, &adjustments);
    ensure_space(&mut glyph_set.glyphs);
    log_verification(&adjustments);

    let font = ufo::build_font(&names, &TYPEFACE_METRICS, &glyph_set.glyphs, &kerning)?;
    Ok(PreparedFont {
        names,
        glyph_set,
        kerning,
        font,
    })
}

/// Compile a prepared font and write `<output_file>.<format>`
pub async fn write_font(
    prepared: &PreparedFont,
    request: &GenerationRequest,
    settings: &Settings,
) -> Result<(PathBuf, usize)> {
    info!("=== GENERATING FONT FILE ===");

    // the temporary directory lives until the compile finishes
    let (ufo_path, _scratch) = match &request.keep_ufo {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            (dir.join(format!("{}.ufo", prepared.names.postscript_name)), None)
        }
        None => {
            let scratch = tempfile::Builder::new().prefix("glyphforge-ufo").tempdir()?;
            let path = scratch.path().join("font.ufo");
            (path, Some(scratch))
        }
    };
    ufo::save_ufo(&prepared.font, &ufo_path)?;
    if request.keep_ufo.is_some() {
        info!("Kept UFO source at {}", ufo_path.display());
    }

    let compiler = FontCompiler::new(&settings.fontc_path);
    let mut font = compiler
        .compile(&ufo_path)
        .await
        .with_context(|| format!("Compiling with {}", compiler.binary().display()))?;

    if let Some(ttfautohint) = &settings.ttfautohint_path {
        let hinter = AutoHinter::new(ttfautohint);
        match hinter.hint(&font).await {
            Ok(hinted) => font = hinted,
            Err(err) => warn!(
                "Autohinting with {} failed, keeping unhinted font: {:#}",
                hinter.binary().display(),
                err
            ),
        }
    }

    let bytes = request
        .format
        .encode(font)
        .with_context(|| format!("Failed to build {} output", request.format))?;

    let output_path = request.output_path();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output_path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Font file successfully created: {} ({} bytes)",
        output_path.display(),
        bytes.len()
    );
    Ok((output_path, bytes.len()))
}

/// Run the whole conversion
pub async fn generate_font(
    request: &GenerationRequest,
    settings: &Settings,
) -> Result<GenerationReport> {
    let prepared = prepare_font(request, settings)?;
    let (output_path, size) = write_font(&prepared, request, settings).await?;
    info!("=== FONT GENERATION COMPLETED ===");

    Ok(GenerationReport {
        output_path,
        size,
        glyph_count: prepared.glyph_set.glyphs.len(),
        kerning_pairs: prepared.kerning.len(),
        skipped: prepared.glyph_set.skipped,
        failed: prepared.glyph_set.failed,
    })
}

/// Set up logging and settings, then run the conversion on a
/// single-threaded runtime
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    let config = ConfigFile::load();
    let settings = Settings::resolve(
        config.as_ref().ok().cloned().flatten(),
        cli_args.fontc.clone(),
        cli_args.log_file,
    );
    let _log_guard = logging::init(cli_args.verbose, settings.log_to_file)?;
    match &config {
        Ok(Some(_)) => debug!("Loaded user settings from {:?}", ConfigFile::config_path()),
        Ok(None) => {}
        Err(err) => warn!("Ignoring user settings: {:#}", err),
    }
    debug!("Settings: {:?}", settings);

    let request = GenerationRequest::from(&cli_args);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let report = runtime.block_on(generate_font(&request, &settings))?;

    if !report.skipped.is_empty() {
        warn!("Skipped characters without images: {:?}", report.skipped);
    }
    if !report.failed.is_empty() {
        warn!("Characters that failed to import: {:?}", report.failed);
    }
    info!(
        "Generated font file: {} ({} bytes)",
        report.output_path.display(),
        report.size
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::adjustments::CharPosition;
    use kurbo::Point;

    fn outlined(ch: char, x0: f64, x1: f64, width: f64) -> GlyphBuild {
        let mut glyph = GlyphBuild::new(ch, width);
        glyph.contours.push(vec![
            Point::new(x0, 0.0),
            Point::new(x1, 0.0),
            Point::new(x1, 700.0),
            Point::new(x0, 700.0),
        ]);
        glyph
    }

    #[test]
    fn test_global_adjustments_without_position() {
        let adjustments = Adjustments {
            letter_spacing: 1.0,
            baseline_offset: 0.5,
            char_width: 90.0,
            ..Default::default()
        };
        let mut glyph = outlined('a', 15.0, 215.0, 245.0);
        apply_positioning(&mut glyph, &adjustments, &adjustments.factors());

        // trunc(245 * 0.9) + 20
        assert_eq!(glyph.width, 240.0);
        assert_eq!(glyph.bounding_box().unwrap().y0, 20.0);
    }

    #[test]
    fn test_position_y_only_keeps_advance() {
        let mut adjustments = Adjustments {
            letter_spacing: 2.0,
            baseline_offset: 1.0,
            ..Default::default()
        };
        adjustments.char_positions.insert(
            "a".to_string(),
            CharPosition {
                x: None,
                y: Some(-0.5),
            },
        );
        let mut glyph = outlined('a', 15.0, 215.0, 245.0);
        apply_positioning(&mut glyph, &adjustments, &adjustments.factors());

        assert_eq!(glyph.width, 245.0);
        // baseline offset is not applied on top of the position
        assert_eq!(glyph.bounding_box().unwrap().y0, -20.0);
    }

    #[test]
    fn test_position_x_moves_left_bearing() {
        let mut adjustments = Adjustments::default();
        adjustments.char_positions.insert(
            "a".to_string(),
            CharPosition {
                x: Some(25.0),
                y: None,
            },
        );
        let mut glyph = outlined('a', 15.0, 215.0, 245.0);
        apply_positioning(&mut glyph, &adjustments, &adjustments.factors());

        assert_eq!(glyph.left_side_bearing(), Some(25.0));
        assert_eq!(glyph.width, 255.0);
    }

    #[test]
    fn test_user_and_dynamic_kerning_layering() {
        let mut adjustments = Adjustments::default();
        adjustments.kerning_pairs.insert("AV".to_string(), -2.0);
        adjustments.kerning_pairs.insert("IH".to_string(), -1.0);
        let glyphs = vec![
            outlined('A', 10.0, 500.0, 520.0),
            outlined('V', 10.0, 500.0, 520.0),
            outlined('I', 10.0, 95.0, 100.0),
            outlined('H', 10.0, 500.0, 520.0),
        ];
        let table = build_kerning(&glyphs, &adjustments);

        assert_eq!(table[&('A', 'V')], -40);
        // the measured pair wins over the user value
        assert_eq!(table[&('I', 'H')], 15);
        assert!(table.keys().all(|(l, r)| "AVIH".contains(*l) && "AVIH".contains(*r)));
    }

    #[test]
    fn test_ensure_space_adds_once() {
        let mut glyphs = vec![GlyphBuild::new('a', 300.0)];
        assert!(ensure_space(&mut glyphs));
        assert!(!ensure_space(&mut glyphs));
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[1].name, "space");
        assert_eq!(glyphs[1].width, 256.0);
    }
}
