use std::process::ExitCode;

use uit_map::{run, Variant};

fn main() -> ExitCode {
    run(Variant::Sprite)
}
