//! Audio device listing command.

use clap::Args;

use zendo_io::list_output_devices;

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_output_devices()?;
    if devices.is_empty() {
        println!("No output devices found.");
        return Ok(());
    }
    println!("Output devices:");
    for (i, name) in devices.iter().enumerate() {
        println!("  [{i}] {name}");
    }
    Ok(())
}
