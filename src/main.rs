//! partita: split post HTML into summary and explanation sections.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use partita::audio::{self, AudioTrack};
use partita::helper::{ContentHelper, HelperOutput};
use partita::{config, input, Partition, Result, SectionLabel};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "partita")]
#[command(about = "Split post HTML into summary and explanation sections", long_about = None)]
struct Args {
    /// Files or directories to split; reads stdin when none are given
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Only output this section, in the template helper's `{ html }` shape
    #[arg(long, short = 's', value_name = "NAME")]
    section: Option<SectionLabel>,

    /// Keep each section's heading in its output
    #[arg(long)]
    include_headings: bool,

    /// Leading paragraphs used as the summary of a post without headings
    #[arg(long, value_name = "N")]
    fallback: Option<usize>,

    /// Hide embedded audio cards in the output
    #[arg(long)]
    hide_audio: bool,

    /// Also report the audio tracks found in each document
    #[arg(long)]
    tracks: bool,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Sections {
    Both(Partition),
    One(HelperOutput),
}

#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(flatten)]
    sections: Sections,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracks: Option<Vec<AudioTrack>>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if args.include_headings {
        cfg.include_headings = true;
    }
    if let Some(fallback) = args.fallback {
        cfg.fallback_paragraphs = fallback;
    }
    if args.hide_audio {
        cfg.hide_audio_cards = true;
    }

    let splitter = cfg.splitter();
    let helper = ContentHelper::new(splitter.clone());

    let sources: Vec<(Option<PathBuf>, String)> = if args.paths.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        vec![(None, buffer)]
    } else {
        let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
        if documents.is_empty() {
            eprintln!("No matching files found");
            return Ok(());
        }
        documents
            .into_iter()
            .map(|path| -> Result<(Option<PathBuf>, String)> {
                let html = std::fs::read_to_string(&path)?;
                Ok((Some(path), html))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let reports: Vec<Report> = sources
        .into_iter()
        .map(|(path, html)| {
            log::debug!(
                "Splitting {}",
                path.as_ref()
                    .map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
            );
            let sections = match args.section {
                Some(label) => Sections::One(helper.get_content(label.as_str(), &html)),
                None => Sections::Both(splitter.partition(&html)),
            };
            Report {
                path,
                sections,
                tracks: args.tracks.then(|| audio::extract_tracks(&html)),
            }
        })
        .collect();

    let json = if reports.len() == 1 {
        serde_json::to_string_pretty(&reports[0])?
    } else {
        serde_json::to_string_pretty(&reports)?
    };
    println!("{json}");

    Ok(())
}
