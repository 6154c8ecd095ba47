use anyhow::Result;
use gcode_command::cli::run;

fn main() -> Result<()> {
    run()
}
