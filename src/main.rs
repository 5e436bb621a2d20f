use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use autograph::inventory;

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
  init_tracing();

  // Phase 1: capture arguments once; everything downstream gets them explicitly
  let args: Vec<String> = std::env::args().skip(1).collect();

  // Phase 2: run the inventory wiring and map the outcome to an exit code
  let pipeline = inventory::pipeline(inventory::settings());
  let code = autograph::run_to_exit_code(&pipeline, &args);
  ExitCode::from(code as u8)
}
