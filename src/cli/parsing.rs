//! CLI parsing helpers for clap value parsers.

pub(super) fn parse_jobs(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("{s} is not a valid number"))?;
    if (1..=super::MAX_JOBS).contains(&value) {
        Ok(value)
    } else {
        Err(format!("jobs must be between 1 and {}", super::MAX_JOBS))
    }
}

/// Accept any non-blank triple.
///
/// Decomposition is left to [`crate::cli::Cli::config`] so that warnings
/// about degenerate triples are emitted once logging is installed.
pub(super) fn parse_triple(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("triple must not be empty".to_owned());
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case("256", Ok(256))]
    #[case("0", Err("jobs must be between 1 and 256"))]
    #[case("257", Err("jobs must be between 1 and 256"))]
    #[case("many", Err("many is not a valid number"))]
    fn jobs_are_bounded(#[case] raw: &str, #[case] expected: Result<usize, &str>) {
        assert_eq!(parse_jobs(raw), expected.map_err(str::to_owned));
    }

    #[rstest]
    fn blank_triples_are_rejected() {
        assert!(parse_triple("  ").is_err());
        assert_eq!(parse_triple(" riscv64-linux "), Ok("riscv64-linux".to_owned()));
    }
}
