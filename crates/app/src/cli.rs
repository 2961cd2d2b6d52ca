use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Chronologically archive community posts")]
pub struct Cli {
    /// Community to collect (e.g. "me_irl").
    #[arg(long)]
    pub community: Option<String>,
    /// Text file with one community name per line.
    #[arg(long, value_name = "PATH")]
    pub community_list: Option<PathBuf>,
    /// First day of the window, YYYY-MM-DD (from 00:00 UTC).
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the window, YYYY-MM-DD (inclusive, whole day).
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,
    /// Per-community cap on collected posts; 0 means unlimited.
    #[arg(long, default_value_t = 1000)]
    pub count: usize,
    /// Text file with one field per line to keep from each post.
    #[arg(long, value_name = "PATH")]
    pub field_list: Option<PathBuf>,
    /// Refresh volatile fields (score, comment counts, ...) from the live
    /// API after collecting. Requires credentials in the environment.
    #[arg(long, default_value_t = false)]
    pub update: bool,
    /// Directory the output files are written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    pub fn cap(&self) -> Option<usize> {
        (self.count > 0).then_some(self.count)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("{value} is not a valid YYYY-MM-DD date"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_dates_and_count() {
        let cli = Cli::try_parse_from([
            "driftnet",
            "--community",
            "me_irl",
            "--start-date",
            "2020-01-01",
            "--end-date",
            "2020-06-30",
            "--count",
            "250",
        ])
        .unwrap();
        assert_eq!(cli.community.as_deref(), Some("me_irl"));
        assert_eq!(
            cli.start_date,
            Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        );
        assert_eq!(
            cli.end_date,
            Some(NaiveDate::from_ymd_opt(2020, 6, 30).unwrap())
        );
        assert_eq!(cli.cap(), Some(250));
    }

    #[test]
    fn rejects_malformed_date() {
        let result = Cli::try_parse_from(["driftnet", "--start-date", "01/02/2020"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_count_means_unlimited() {
        let cli =
            Cli::try_parse_from(["driftnet", "--community", "me_irl", "--count", "0"]).unwrap();
        assert_eq!(cli.cap(), None);
    }

    #[test]
    fn count_defaults_to_one_thousand() {
        let cli = Cli::try_parse_from(["driftnet", "--community", "me_irl"]).unwrap();
        assert_eq!(cli.cap(), Some(1000));
    }
}
