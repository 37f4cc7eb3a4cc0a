use std::path::Path;

use console::Style;
use tricolor_core::pipeline::config::PipelineConfig;
use tricolor_core::pipeline::{PlateReport, PlateSummary};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

fn on_off(s: &Styles, enabled: bool) -> String {
    if enabled {
        s.method.apply_to("on").to_string()
    } else {
        s.disabled.apply_to("off").to_string()
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig, plates: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Tricolor"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Plates"),
        s.value.apply_to(plates)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(config.output.format)
    );
    println!();

    println!("  {}", s.header.apply_to("Alignment"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(&config.alignment)
    );
    println!();

    println!("  {}", s.header.apply_to("Post-processing"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("RGB eq."),
        on_off(&s, config.contrast.rgb)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("L*a*b* eq."),
        on_off(&s, config.contrast.lab)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Auto crop"),
        on_off(&s, config.auto_crop.enabled)
    );
    println!();
}

pub fn print_alignment_summary(input: &Path, summary: &PlateSummary) {
    let s = Styles::new();
    let (h, w) = summary.size;

    println!();
    println!("  {}", s.path.apply_to(input.display()));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Green"),
        s.value.apply_to(summary.alignment.green)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Red"),
        s.value.apply_to(summary.alignment.red)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Composite"),
        s.value.apply_to(format!("{}x{}", w, h))
    );
    for path in &summary.written {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Wrote"),
            s.path.apply_to(path.display())
        );
    }
}

pub fn print_batch_summary(reports: &[PlateReport]) {
    let s = Styles::new();

    for report in reports {
        match &report.outcome {
            Ok(summary) => print_alignment_summary(&report.input, summary),
            Err(e) => {
                println!();
                println!("  {}", s.path.apply_to(report.input.display()));
                println!(
                    "    {:<12}{}",
                    s.label.apply_to("Error"),
                    s.error.apply_to(e)
                );
            }
        }
    }
    println!();
}
