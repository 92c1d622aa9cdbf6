use clap::ValueEnum;

use crate::command::Cli;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub enum Output {
    JSON,
    YAML,
    None,
}

pub(crate) enum CommandOutput {
    Plain(String),
    Object(Box<dyn erased_serde::Serialize>),
}
pub(crate) type CommandResult = color_eyre::eyre::Result<CommandOutput>;

impl From<&str> for CommandOutput {
    fn from(text: &str) -> Self {
        CommandOutput::Plain(text.to_owned())
    }
}
impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Plain(text)
    }
}
impl From<()> for CommandOutput {
    fn from(_: ()) -> Self {
        CommandOutput::Plain(String::new())
    }
}

pub(crate) struct RenderConfig {
    pub output: Output,
    pub quiet: bool,
}

impl RenderConfig {
    pub fn new(cli: &Cli) -> Self {
        Self {
            output: cli.output,
            quiet: cli.quiet,
        }
    }

    pub fn render_result(&self, result: CommandResult) -> color_eyre::eyre::Result<()> {
        match result {
            // Errors will be passed through to the caller, and rendered by the main function
            Err(e) => Err(e),

            Ok(_) if self.quiet || self.output == Output::None => Ok(()),

            // Plain text is just output as is
            Ok(CommandOutput::Plain(text)) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
                Ok(())
            }

            // For objects, we serialize them based on the output format
            Ok(CommandOutput::Object(obj)) => {
                match self.output {
                    Output::JSON => {
                        let json = serde_json::to_string_pretty(&*obj)?;
                        println!("{}", json);
                    }
                    Output::YAML => {
                        let yaml = serde_yaml::to_string(&*obj)?;
                        print!("{}", yaml);
                    }
                    Output::None => unreachable!(),
                }
                Ok(())
            }
        }
    }
}
