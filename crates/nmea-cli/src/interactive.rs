//! Line-oriented prompt: `DR,GNSS,TYPES` per conversion, `e` to exit.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::ConvertRequest;

pub const PROMPT: &str = "\nDR.csv,GNSS.csv,types (GGA/RMC/GSV/GSA, joined with +)\n[e to exit]: ";

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptLine {
    Exit,
    Convert(ConvertRequest),
    /// Fewer than two commas; nothing to run.
    Ignored,
}

/// Splits a line at its first two commas.
///
/// An empty DR or GNSS part leaves that path unset; everything after the
/// second comma is the type selector.
pub fn parse_prompt_line(line: &str, output_dir: &Path) -> PromptLine {
    let line = line.trim();
    if line == "e" {
        return PromptLine::Exit;
    }
    let Some((dr, rest)) = line.split_once(',') else {
        return PromptLine::Ignored;
    };
    let Some((gnss, types)) = rest.split_once(',') else {
        return PromptLine::Ignored;
    };
    let path = |part: &str| {
        let part = part.trim();
        (!part.is_empty()).then(|| PathBuf::from(part))
    };
    PromptLine::Convert(ConvertRequest {
        dr: path(dr),
        gnss: path(gnss),
        types: types.trim().to_string(),
        output_dir: output_dir.to_path_buf(),
    })
}

/// Prompts on `prompt_out` and reads lines from `input` until `e` or end of
/// input, handing each request to `convert`.
pub fn run_prompt_loop<R, W, F>(
    mut input: R,
    mut prompt_out: W,
    output_dir: &Path,
    mut convert: F,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(ConvertRequest),
{
    let mut line = String::new();
    loop {
        write!(prompt_out, "{PROMPT}")?;
        prompt_out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match parse_prompt_line(&line, output_dir) {
            PromptLine::Exit => return Ok(()),
            PromptLine::Convert(request) => convert(request),
            PromptLine::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn splits_on_first_two_commas() {
        let line = parse_prompt_line("dr.csv,gnss.csv,GGA+RMC\n", Path::new("out"));
        assert_eq!(
            line,
            PromptLine::Convert(ConvertRequest {
                dr: Some(PathBuf::from("dr.csv")),
                gnss: Some(PathBuf::from("gnss.csv")),
                types: "GGA+RMC".to_string(),
                output_dir: PathBuf::from("out"),
            })
        );
    }

    #[test]
    fn empty_dr_is_allowed() {
        let PromptLine::Convert(request) = parse_prompt_line(",gnss.csv,RMC", Path::new(".")) else {
            panic!("expected a request");
        };
        assert_eq!(request.dr, None);
        assert_eq!(request.gnss, Some(PathBuf::from("gnss.csv")));
    }

    #[test]
    fn exit_and_incomplete_lines() {
        assert_eq!(parse_prompt_line("e\n", Path::new(".")), PromptLine::Exit);
        assert_eq!(parse_prompt_line("gnss.csv,GGA", Path::new(".")), PromptLine::Ignored);
        assert_eq!(parse_prompt_line("", Path::new(".")), PromptLine::Ignored);
    }

    #[test]
    fn loop_stops_at_exit() {
        let input = Cursor::new("a.csv,b.csv,GGA\nnonsense\ne\n,c.csv,RMC\n");
        let mut prompts = Vec::new();
        let mut seen = Vec::new();
        run_prompt_loop(input, &mut prompts, Path::new("."), |request| seen.push(request.types))
            .unwrap();
        assert_eq!(seen, vec!["GGA".to_string()]);
        let prompts = String::from_utf8(prompts).unwrap();
        assert_eq!(prompts.matches("[e to exit]").count(), 3);
    }
}
