use anyhow::Result;
use std::io::{BufRead, Write};
use textindex::{ResultRetriever, Statistics};

const DEFAULT_MAX_RESULTS: i64 = 10;

const MENU: &str = "\nWhat would you like to do?\n\
1. Search\n\
2. General statistics\n\
3. Document statistics\n\
4. Quit\n";

/// Menu loop over `input`; returns on quit or end of input.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    retriever: &ResultRetriever<'_>,
    stats: &Statistics<'_>,
) -> Result<()> {
    writeln!(out, "{}", stats.display_general_stats())?;
    loop {
        write!(out, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut out, "Enter your choice (1-4): ")? else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(query) = prompt(&mut input, &mut out, "Search query: ")? else { break };
                let Some(mode) = prompt(&mut input, &mut out, "Use OR logic? (y/n, default: AND): ")? else {
                    break;
                };
                let use_all_terms = !mode.eq_ignore_ascii_case("y");
                let Some(limit) = prompt(&mut input, &mut out, "Maximum results (default: 10): ")? else {
                    break;
                };
                let max_results = limit.parse::<u32>().map(i64::from).unwrap_or(DEFAULT_MAX_RESULTS);

                let mode = if use_all_terms { "AND" } else { "OR" };
                tracing::debug!(%query, mode, max_results, "shell search");
                writeln!(out, "\nSearching for '{query}' in {mode} mode...")?;
                writeln!(out, "{}", retriever.display_results(&query, use_all_terms, max_results))?;
            }
            "2" => {
                writeln!(out, "\n{}", stats.display_general_stats())?;
                writeln!(out, "{}", stats.display_most_frequent_words(10))?;
            }
            "3" => {
                let Some(doc) = prompt(&mut input, &mut out, "Document name: ")? else { break };
                writeln!(out, "\n{}", stats.display_document_stats(&doc))?;
            }
            "4" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice, please try again.")?,
        }
    }
    out.flush()?;
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
