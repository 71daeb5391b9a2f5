// Reading knapsack instances from their text format:
//
//   item_count
//
//   profits (item_count tokens)
//
//   capacity
//
//   weights (item_count tokens)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::domain::{
    models::Instance,
    solver_service::{KnapsackError, Result},
};

/// Load an instance file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| KnapsackError::io(path, e))?;
    log::debug!("loading instance {}", path.display());
    parse_instance(BufReader::new(file))
}

/// Parse an instance. Blank lines only separate the four data lines.
pub fn parse_instance(reader: impl BufRead) -> Result<Instance> {
    let mut lines = DataLines::new(reader);

    let (line_no, line) = lines.next_line("item count")?;
    let item_count: usize = parse_token(line.trim(), line_no, "item count")?;
    if item_count == 0 {
        return Err(KnapsackError::Format(format!(
            "line {}: item count must be positive",
            line_no
        )));
    }

    let profits = lines.next_vector("profits", item_count)?;

    let (line_no, line) = lines.next_line("capacity")?;
    let capacity = parse_number(line.trim(), line_no, "capacity")?;

    let weights = lines.next_vector("weights", item_count)?;

    if let Some((line_no, _)) = lines.next_data_line()? {
        return Err(KnapsackError::Format(format!(
            "line {}: unexpected content after the weights",
            line_no
        )));
    }

    Instance::new(profits, capacity, weights)
}

fn parse_token<T: FromStr>(token: &str, line_no: usize, what: &str) -> Result<T> {
    token
        .parse::<T>()
        .map_err(|_| unreadable(token, line_no, what))
}

/// `f64::from_str` also takes `NaN`, `inf` and `infinity`; those are not numbers here.
fn parse_number(token: &str, line_no: usize, what: &str) -> Result<f64> {
    match parse_token::<f64>(token, line_no, what)? {
        value if value.is_finite() => Ok(value),
        _ => Err(unreadable(token, line_no, what)),
    }
}

fn unreadable(token: &str, line_no: usize, what: &str) -> KnapsackError {
    KnapsackError::Format(format!(
        "line {}: failed to read {}; found `{}`",
        line_no, what, token
    ))
}

/// Non-blank lines of a reader, with their 1-based line numbers.
struct DataLines<R> {
    reader: R,
    line_no: usize,
    line: String,
}

impl<R: BufRead> DataLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            line: String::new(),
        }
    }

    fn next_data_line(&mut self) -> Result<Option<(usize, &str)>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| KnapsackError::Format(format!("line {}: {}", self.line_no + 1, e)))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if !self.line.trim().is_empty() {
                return Ok(Some((self.line_no, self.line.as_str())));
            }
        }
    }

    fn next_line(&mut self, what: &str) -> Result<(usize, &str)> {
        let line_no = self.line_no;
        self.next_data_line()?.ok_or_else(|| {
            KnapsackError::Format(format!(
                "premature end of file after line {}; expected {}",
                line_no, what
            ))
        })
    }

    fn next_vector(&mut self, what: &str, expected: usize) -> Result<Vec<f64>> {
        let (line_no, line) = self.next_line(what)?;
        let values = line
            .split_whitespace()
            .map(|token| parse_number(token, line_no, what))
            .collect::<Result<Vec<_>>>()?;

        if values.len() != expected {
            return Err(KnapsackError::Format(format!(
                "line {}: expected {} {} but found {}",
                line_no,
                expected,
                what,
                values.len()
            )));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Instance> {
        parse_instance(text.as_bytes())
    }

    #[test]
    fn reads_the_six_line_layout() {
        let instance = parse("3\n\n60 100 120\n\n50\n\n10 20 30\n").unwrap();

        assert_eq!(instance.item_count(), 3);
        assert_eq!(instance.profits(), &[60.0, 100.0, 120.0]);
        assert_eq!(instance.capacity(), 50.0);
        assert_eq!(instance.weights(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn tolerates_crlf_and_missing_blank_lines() {
        let instance = parse("2\r\n10 10\r\n5\r\n\r\n\r\n10 5").unwrap();
        assert_eq!(instance.weights(), &[10.0, 5.0]);
    }

    #[test]
    fn too_few_profits_is_format_error() {
        let err = parse("5\n\n1 2 3 4\n\n10\n\n1 1 1 1 1\n").unwrap_err();
        assert!(matches!(err, KnapsackError::Format(msg) if msg.contains("line 3")));
    }

    #[test]
    fn non_numeric_token_is_format_error() {
        let err = parse("2\n\n1 x\n\n10\n\n1 1\n").unwrap_err();
        assert!(matches!(err, KnapsackError::Format(_)));
    }

    #[test]
    fn non_finite_words_are_format_errors() {
        let nan_profit = parse("2\n\n1 NaN\n\n10\n\n1 1\n").unwrap_err();
        assert!(matches!(nan_profit, KnapsackError::Format(msg) if msg.contains("`NaN`")));

        let inf_capacity = parse("2\n\n1 2\n\ninf\n\n1 1\n").unwrap_err();
        assert!(matches!(inf_capacity, KnapsackError::Format(msg) if msg.contains("capacity")));

        let infinite_weight = parse("2\n\n1 2\n\n10\n\n1 infinity\n").unwrap_err();
        assert!(matches!(infinite_weight, KnapsackError::Format(msg) if msg.contains("line 7")));
    }

    #[test]
    fn truncated_file_is_format_error() {
        let err = parse("2\n\n1 2\n\n10\n").unwrap_err();
        assert!(matches!(err, KnapsackError::Format(msg) if msg.contains("weights")));
    }

    #[test]
    fn trailing_data_is_format_error() {
        let err = parse("1\n\n1\n\n1\n\n1\n\n7\n").unwrap_err();
        assert!(matches!(err, KnapsackError::Format(_)));
    }

    #[test]
    fn zero_weight_is_domain_error() {
        let err = parse("2\n\n1 2\n\n10\n\n0 1\n").unwrap_err();
        assert!(matches!(err, KnapsackError::Domain(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_instance("/nonexistent/knapsack/instance.txt").unwrap_err();
        assert!(matches!(err, KnapsackError::Io { .. }));
    }
}
