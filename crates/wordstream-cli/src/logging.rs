use stderrlog::{LogLevelNum, Timestamp};

/// Module prefixes whose log records reach stderr.
///
/// `wordstream` covers both the library and this binary.
const LOG_MODULES: &[&str] = &["wordstream", "wordstream_paths"];

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective level; `-v` counts replace the command's default.
    ///
    /// 0 is off, 3 is `Info`, 5 and above is `Trace`.
    fn level(
        &self,
        default: u8,
    ) -> LogLevelNum {
        let level = match self.verbose {
            Some(verbose) if verbose > 0 => verbose,
            _ => default,
        };
        match level {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        }
    }

    /// Install the stderr logger for the pipeline crates.
    ///
    /// `stats` passes 2 so its table is not interleaved with progress lines;
    /// the model commands pass 3 to report tokenizing, fitting, and evaluation.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .modules(LOG_MODULES.iter().copied())
            .quiet(self.quiet)
            .verbosity(self.level(default))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_args(verbose: Option<u8>) -> LogArgs {
        LogArgs {
            quiet: false,
            verbose,
            ts: false,
        }
    }

    #[test]
    fn test_command_default_level() {
        assert!(matches!(log_args(None).level(3), LogLevelNum::Info));
        assert!(matches!(log_args(Some(0)).level(2), LogLevelNum::Warn));
        assert!(matches!(log_args(None).level(0), LogLevelNum::Off));
    }

    #[test]
    fn test_verbose_overrides_default() {
        assert!(matches!(log_args(Some(1)).level(3), LogLevelNum::Error));
        assert!(matches!(log_args(Some(4)).level(2), LogLevelNum::Debug));
        assert!(matches!(log_args(Some(9)).level(3), LogLevelNum::Trace));
    }
}
