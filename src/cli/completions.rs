use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    loaf completions bash > ~/.bash_completion.d/loaf\n\n\
                  Generate zsh completions:\n    loaf completions zsh > ~/.zfunc/_loaf\n\n\
                  Generate fish completions:\n    loaf completions fish > ~/.config/fish/completions/loaf.fish\n\n\
                  Generate PowerShell completions:\n    loaf completions powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
