use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::models::Strategy;

/// Command line arguments
///
/// Every flag is optional; anything given overrides the loaded settings.
#[derive(Parser, Debug)]
#[command(name = "stable-pairs")]
#[command(author, version, about = "Stable matching with fairness reporting", long_about = None)]
pub struct Args {
    /// Preference profile (.json or .toml); runs an experiment when omitted
    pub profile: Option<PathBuf>,

    /// Matching strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Let the responders propose
    #[arg(short, long)]
    pub reverse_roles: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Participants per side in an experiment
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Experiment repetitions
    #[arg(long)]
    pub runs: Option<usize>,

    /// Seed for random preferences
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    #[value(name = "gale-shapley", alias = "gale_shapley")]
    GaleShapley,
    #[value(name = "naive")]
    Naive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::GaleShapley => Strategy::GaleShapley,
            StrategyArg::Naive => Strategy::Naive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl FormatArg {
    fn as_str(self) -> &'static str {
        match self {
            FormatArg::Text => "text",
            FormatArg::Json => "json",
        }
    }
}

impl Args {
    /// Layer the flags over `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(strategy) = self.strategy {
            settings.matching.strategy = strategy.into();
        }
        if self.reverse_roles {
            settings.matching.reverse_roles = true;
        }
        if let Some(format) = self.format {
            settings.output.format = format.as_str().to_string();
        }
        if let Some(count) = self.count {
            settings.experiment.count = count;
        }
        if let Some(runs) = self.runs {
            settings.experiment.runs = runs;
        }
        if let Some(seed) = self.seed {
            settings.experiment.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn settings() -> Settings {
        config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_help_is_not_a_profile_path() {
        let err = Args::try_parse_from(["stable-pairs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["stable-pairs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Args::try_parse_from(["stable-pairs", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_profile_and_flags() {
        let args = Args::try_parse_from([
            "stable-pairs",
            "fixtures/students.json",
            "--strategy",
            "naive",
            "--reverse-roles",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.profile, Some(PathBuf::from("fixtures/students.json")));
        assert_eq!(args.strategy, Some(StrategyArg::Naive));
        assert!(args.reverse_roles);
        assert_eq!(args.format, Some(FormatArg::Json));
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let mut settings = settings();
        let args = Args::try_parse_from(["stable-pairs", "-s", "naive", "--runs", "5", "--seed", "7"]).unwrap();
        args.apply(&mut settings);

        assert_eq!(settings.matching.strategy, Strategy::Naive);
        assert!(!settings.matching.reverse_roles);
        assert_eq!(settings.output.format, "text");
        assert_eq!(settings.experiment.count, 100);
        assert_eq!(settings.experiment.runs, 5);
        assert_eq!(settings.experiment.seed, 7);
    }

    #[test]
    fn test_no_arguments_runs_experiment() {
        let args = Args::try_parse_from(["stable-pairs"]).unwrap();
        assert!(args.profile.is_none());

        let mut settings = settings();
        args.apply(&mut settings);
        assert_eq!(settings.matching.strategy, Strategy::GaleShapley);
        assert_eq!(settings.output.format, "text");
    }

    #[test]
    fn test_invalid_strategy_value() {
        let err = Args::try_parse_from(["stable-pairs", "--strategy", "random"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
