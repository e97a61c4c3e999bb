use clap::Parser;

/// Arguments for build command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Build every enabled target:\n    loaf build\n\n\
                  Build only the Gemini skills:\n    loaf build --target gemini\n\n\
                  Build two targets:\n    loaf build -t remote -t gemini")]
pub struct BuildArgs {
    /// Target to build (repeatable; defaults to every enabled target)
    #[arg(long = "target", short = 't', value_name = "NAME")]
    pub targets: Vec<String>,
}
