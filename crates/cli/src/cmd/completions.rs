use clap::CommandFactory;

use crate::{Cli, CompletionsArgs};

pub fn run(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "fillin", &mut std::io::stdout());
}
