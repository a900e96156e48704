use anyhow::Context;
use mcm_chart::{ChartConfig, ChartGenerator};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let generator = ChartGenerator::new(ChartConfig::default());
    let mut stdout = std::io::stdout().lock();
    generator
        .run(&mut stdout)
        .with_context(|| format!("plotting {}", generator.config.input.display()))
}
