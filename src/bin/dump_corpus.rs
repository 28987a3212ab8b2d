//! Debug tool to dump and query a parsed scripture corpus.
//!
//! Usage:
//!   `cargo run --bin dump_corpus -- <bom.txt>`
//!   `cargo run --bin dump_corpus -- <bom.txt> --search faith --suggest lov`
//!   `cargo run --bin dump_corpus -- <bom.txt> --chapter "1 Nephi 3"`
//!   `cargo run --bin dump_corpus -- <bom.txt> --front-matter 0 --json`
//!
//! Prints segmentation statistics, or the output of individual queries, so
//! heuristic changes can be checked against a real file.

use anyhow::{bail, Context, Result};
use std::env;

use versefinder::constants::parser::DEFAULT_FRONT_MATTER_LINES;
use versefinder::corpus::{parse, Corpus, Direction, ParseOptions};

#[derive(Debug, Default)]
struct Args {
    path: String,
    front_matter_lines: Option<usize>,
    search: Option<String>,
    suggest: Option<String>,
    chapter: Option<String>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--front-matter" => {
                let value = iter.next().context("--front-matter needs a line count")?;
                args.front_matter_lines =
                    Some(value.parse().with_context(|| format!("not a line count: {value}"))?);
            }
            "--search" => args.search = Some(iter.next().context("--search needs a query")?),
            "--suggest" => args.suggest = Some(iter.next().context("--suggest needs a prefix")?),
            "--chapter" => args.chapter = Some(iter.next().context("--chapter needs an id")?),
            "--json" => args.json = true,
            other if args.path.is_empty() => args.path = other.to_string(),
            other => bail!("unexpected argument: {other}"),
        }
    }

    if args.path.is_empty() {
        bail!(
            "Usage: dump_corpus <file> [--front-matter N] [--search Q] [--suggest P] [--chapter ID] [--json]"
        );
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let raw = fs_err::read_to_string(&args.path)?;
    let options = ParseOptions::with_front_matter_lines(
        args.front_matter_lines.unwrap_or(DEFAULT_FRONT_MATTER_LINES),
    );
    let corpus = parse(&raw, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&corpus)?);
        return Ok(());
    }

    let queried = args.search.is_some() || args.suggest.is_some() || args.chapter.is_some();
    if !queried {
        print_summary(&corpus);
    }
    if let Some(prefix) = &args.suggest {
        print_suggestions(&corpus, prefix);
    }
    if let Some(query) = &args.search {
        print_search(&corpus, query);
    }
    if let Some(chapter_id) = &args.chapter {
        print_chapter(&corpus, chapter_id);
    }
    Ok(())
}

fn print_summary(corpus: &Corpus) {
    println!("Front matter: {} lines", corpus.front_matter.lines().count());
    println!("Verses:       {}", corpus.verses.len());
    println!("Chapters:     {}", corpus.chapters.len());
    println!("Words:        {}", corpus.words.len());

    let synthesized = corpus.verses.iter().filter(|v| v.verse_label().is_none()).count();
    println!("Synthesized references: {synthesized}");

    if let (Some(first), Some(last)) = (corpus.chapters.first(), corpus.chapters.last()) {
        println!("First chapter: {first}");
        println!("Last chapter:  {last}");
    }
}

fn print_suggestions(corpus: &Corpus, prefix: &str) {
    let suggestions = corpus.index().suggest(prefix);
    println!("Suggestions for {prefix:?}: {}", suggestions.join(", "));
}

fn print_search(corpus: &Corpus, query: &str) {
    let Some(results) = corpus.index().search(query) else {
        println!("Empty query, nothing searched.");
        return;
    };

    if results.is_empty() {
        println!("No matches found.");
        return;
    }

    for verse in results.verses() {
        println!("[{}] {}", verse.reference, verse.text);
    }
    if results.is_capped() {
        println!("Results limited to {} verses.", results.len());
    }
}

fn print_chapter(corpus: &Corpus, chapter_id: &str) {
    let index = corpus.index();
    let verses = index.verses_in_chapter(chapter_id);
    if verses.is_empty() {
        println!("Unknown chapter: {chapter_id}");
        return;
    }

    println!("== {chapter_id}");
    for verse in verses {
        match verse.verse_label() {
            Some(label) => println!("{label} {}", verse.text),
            None => println!("{}", verse.text),
        }
    }

    let previous = index.adjacent_chapter(chapter_id, Direction::Previous).unwrap_or("-");
    let next = index.adjacent_chapter(chapter_id, Direction::Next).unwrap_or("-");
    println!("<< {previous} | {next} >>");
}
