use clap::Parser;

use restock_cli::Cli;

fn main() -> anyhow::Result<()> {
    restock_observability::init();

    let cli = Cli::parse();
    let output = restock_cli::run(&cli)?;
    println!("{output}");
    Ok(())
}
