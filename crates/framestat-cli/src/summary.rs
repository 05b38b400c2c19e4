use console::Style;
use framestat_core::batch::BatchAnalyzer;
use framestat_core::config::AnalysisConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
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
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red(),
        }
    }
}

pub enum ProfileKind {
    Column(usize),
    Row(usize),
}

pub fn print_batch_summary(config: &AnalysisConfig, batch: &BatchAnalyzer) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Folder Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Folder"),
        s.path.apply_to(config.folder.display())
    );
    match config.roi {
        Some(roi) => println!(
            "  {:<14}{}",
            s.label.apply_to("ROI"),
            s.value
                .apply_to(format!("{} ({}x{})", roi, roi.width(), roi.height()))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("ROI"),
            s.disabled.apply_to("full frame")
        ),
    }
    match &batch.options().filter {
        Some(p) => println!(
            "  {:<14}{}",
            s.label.apply_to("Smoothing"),
            s.value
                .apply_to(format!("Butterworth stopband2={} order={}", p.stopband2(), p.order()))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Smoothing"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.value.apply_to(batch.len())
    );
    println!();

    if batch.is_empty() {
        println!("  {}", s.disabled.apply_to("No images analyzed"));
    } else {
        print_table(&s, batch);
    }

    if !batch.failures().is_empty() {
        println!();
        println!("  {}", s.header.apply_to("Skipped"));
        for failure in batch.failures() {
            println!(
                "    {:>4}  {}  {}",
                failure.index,
                s.path.apply_to(failure.path.display()),
                s.error.apply_to(&failure.error)
            );
        }
    }
    println!();
}

fn print_table(s: &Styles, batch: &BatchAnalyzer) {
    let centers = batch.center_points();
    let averages = batch.average_values();
    let shifted = batch.center_points_without_shift();
    let entropies = batch.entropies();

    println!(
        "  {}",
        s.header.apply_to(format!(
            "{:>4}  {:>10}  {:>10}  {:>10}  {:>8}  {}",
            "#", "average", "center", "center-avg", "entropy", "file"
        ))
    );
    for (i, path) in batch.paths().iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "  {:>4}  {:>10.3}  {:>10.3}  {:>10.3}  {:>8.4}  {}",
            i,
            averages[i],
            centers[i],
            shifted[i],
            entropies[i],
            s.label.apply_to(name)
        );
    }
}

/// Print a `samples x images` profile matrix, one line per sampled position.
pub fn print_profile(kind: ProfileKind, matrix: &[Vec<f64>]) {
    let s = Styles::new();
    let title = match kind {
        ProfileKind::Column(x) => format!("Column profile (x = {x})"),
        ProfileKind::Row(y) => format!("Row profile (y = {y})"),
    };

    println!("  {}", s.header.apply_to(title));
    for (i, row) in matrix.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:8.2}")).collect();
        println!("    {}  {}", s.label.apply_to(format!("{i:>3}")), cells.join(" "));
    }
    println!();
}
