use tricolor_core::align::metric::SimilarityMetric;
use tricolor_core::pipeline::config::{
    AlignmentMethod, FlatConfig, OutputFormat, PipelineConfig, PyramidConfig,
};

#[test]
fn test_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(
        config.alignment,
        AlignmentMethod::Pyramid(PyramidConfig {
            levels: 4,
            window_radius: 20,
            metric: SimilarityMetric::NormalizedCrossCorrelation,
        })
    );
    assert!(config.contrast.rgb);
    assert!(config.contrast.lab);
    assert!(config.auto_crop.enabled);
    assert_eq!(config.output.format, OutputFormat::Jpeg);
    assert_eq!(config.output.jpeg_quality, 100);

    let flat = FlatConfig::default();
    assert_eq!(flat.window_radius, 15);
    assert_eq!(flat.metric, SimilarityMetric::EuclideanDistance);
}

#[test]
fn test_display() {
    assert_eq!(
        AlignmentMethod::default().to_string(),
        "Pyramid (4 levels, window \u{b1}20, Normalized Cross-Correlation)"
    );
    assert_eq!(
        AlignmentMethod::Flat(FlatConfig::default()).to_string(),
        "Flat (window \u{b1}15, Euclidean Distance)"
    );
    assert_eq!(OutputFormat::Tiff.to_string(), "TIFF");
    assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
}

#[test]
fn test_toml_round_trip() {
    let config = PipelineConfig::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: PipelineConfig = toml::from_str(&text).unwrap();

    assert_eq!(parsed.alignment, config.alignment);
    assert_eq!(parsed.contrast, config.contrast);
    assert_eq!(parsed.auto_crop, config.auto_crop);
    assert_eq!(parsed.output, config.output);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r#"
        [alignment.Flat]
        window_radius = 5

        [output]
        format = "Png"
    "#;
    let parsed: PipelineConfig = toml::from_str(text).unwrap();

    assert_eq!(
        parsed.alignment,
        AlignmentMethod::Flat(FlatConfig {
            window_radius: 5,
            metric: SimilarityMetric::EuclideanDistance,
        })
    );
    assert_eq!(parsed.output.format, OutputFormat::Png);
    assert_eq!(parsed.output.jpeg_quality, 100);
    assert!(parsed.contrast.lab);
}

#[test]
fn test_empty_toml_is_default() {
    let parsed: PipelineConfig = toml::from_str("").unwrap();
    assert_eq!(parsed.alignment, AlignmentMethod::default());
}

#[test]
fn test_metric_json_names() {
    let json = serde_json::to_string(&SimilarityMetric::EuclideanDistance).unwrap();
    assert_eq!(json, "\"EuclideanDistance\"");
    let parsed: SimilarityMetric = serde_json::from_str("\"NormalizedCrossCorrelation\"").unwrap();
    assert_eq!(parsed, SimilarityMetric::NormalizedCrossCorrelation);
}
