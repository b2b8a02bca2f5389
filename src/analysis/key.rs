use anyhow::{Result, bail};

/// Join key parsed from a test-run file name such as
/// `210409 MRC Sample B1Data`: the first digit run is the date id, the last
/// character before the second digit run is the sample letter, and the second
/// digit run is the replicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub date_id: String,
    pub sample_id: String,
    pub replicate: String,
}

impl SampleKey {
    pub fn parse(stem: &str) -> Result<Self> {
        let runs = split_digit_runs(stem);
        // runs alternate: text, digits, text, digits, ...
        if runs.len() < 4 {
            bail!(
                "'{}' does not contain a date id, sample letter and replicate number",
                stem
            );
        }
        let date_id = runs[1];
        let sample_id = match runs[2].chars().last() {
            Some(c) if c.is_ascii_alphabetic() => c.to_string(),
            _ => bail!(
                "'{}' has no sample letter directly before the replicate number",
                stem
            ),
        };
        let replicate = runs[3];

        Ok(Self {
            date_id: date_id.to_string(),
            sample_id,
            replicate: replicate.to_string(),
        })
    }
}

impl std::fmt::Display for SampleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.date_id, self.sample_id, self.replicate)
    }
}

/// Splits into alternating non-digit and digit runs, always starting with a
/// (possibly empty) non-digit run.
fn split_digit_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_digits = false;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if digit != in_digits {
            runs.push(&s[start..i]);
            start = i;
            in_digits = digit;
        }
    }
    runs.push(&s[start..]);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_start_with_text() {
        assert_eq!(split_digit_runs("12ab3"), vec!["", "12", "ab", "3"]);
        assert_eq!(split_digit_runs("x"), vec!["x"]);
    }
}
