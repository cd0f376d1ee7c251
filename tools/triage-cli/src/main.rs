use std::env;
use std::path::PathBuf;

use similarity_index::tfidf_index::{TfidfIndex, TfidfParams};
use ticket_prep::prepare_corpus;
use triage_service::{ServiceConfig, TriageService};

fn print_usage() {
    eprintln!(
        "Usage:\n\
         triage-cli prepare INPUT_CSV OUTPUT_CSV [--encoding ENC]\n\
         triage-cli build CORPUS_CSV\n\
         triage-cli query CORPUS_CSV --query TEXT [--k N]\n\
         triage-cli triage CORPUS_CSV --text TEXT [--k N] [--log PATH]\n\
         \n\
         Notes: ENC is utf-8 (default), shift_jis, windows-1252, utf-16le or utf-16be.\n"
    );
}

fn do_prepare(tail: Vec<String>) -> Result<(), String> {
    if tail.len() < 2 {
        return Err("prepare requires INPUT_CSV and OUTPUT_CSV".into());
    }
    let input = tail[0].clone();
    let output = tail[1].clone();
    let mut encoding: Option<String> = None;
    let mut i = 2;
    while i < tail.len() {
        match tail[i].as_str() {
            "--encoding" => {
                if i + 1 < tail.len() {
                    encoding = Some(tail[i + 1].clone());
                    i += 2;
                } else {
                    return Err("--encoding requires a name".into());
                }
            }
            _ => {
                i += 1;
            }
        }
    }
    let summary = prepare_corpus(&input, &output, encoding.as_deref())
        .map_err(|e| format!("prepare failed: {e}"))?;
    println!(
        "prepared {} rows -> {} (subject: {}, body: {}, category: {})",
        summary.rows,
        output,
        summary.subject_column.as_deref().unwrap_or("-"),
        summary.body_column.as_deref().unwrap_or("-"),
        summary.category_column.as_deref().unwrap_or("-"),
    );
    Ok(())
}

fn do_build(tail: Vec<String>) -> Result<(), String> {
    if tail.is_empty() {
        return Err("build requires CORPUS_CSV".into());
    }
    let corpus = &tail[0];
    match TfidfIndex::build_from_csv(corpus, &TfidfParams::default()) {
        Ok(index) => {
            println!(
                "built tf-idf index for {} historical tickets ({} dimensions)",
                index.len(),
                index.dimensions()
            );
            Ok(())
        }
        Err(e) if e.is_unavailable() => {
            println!("no usable corpus at {corpus}; index would be absent ({e})");
            Ok(())
        }
        Err(e) => Err(format!("index build failed: {e}")),
    }
}

fn do_query(mut tail: Vec<String>) -> Result<(), String> {
    if tail.is_empty() {
        return Err("query requires CORPUS_CSV".into());
    }
    let corpus = tail.remove(0);
    let mut query: Option<String> = None;
    let mut k = 5usize;
    let mut i = 0;
    while i < tail.len() {
        match tail[i].as_str() {
            "--query" => {
                if i + 1 < tail.len() {
                    query = Some(tail[i + 1].clone());
                    i += 2;
                } else {
                    return Err("--query requires text".into());
                }
            }
            "--k" => {
                if i + 1 < tail.len() {
                    k = tail[i + 1].parse().unwrap_or(k);
                    i += 2;
                } else {
                    return Err("--k requires a number".into());
                }
            }
            _ => {
                i += 1;
            }
        }
    }
    let query = query.ok_or_else(|| String::from("query requires --query TEXT"))?;

    let index = TfidfIndex::build_from_csv(&corpus, &TfidfParams::default())
        .map_err(|e| format!("index build failed: {e}"))?;
    let hits = index.query(&query, k);
    println!("Results: {}", hits.len());
    for (i, h) in hits.iter().enumerate() {
        let preview: String = h.snippet.chars().take(80).collect();
        println!("{:>2}. [row {}] {:.4} {}", i + 1, h.row_index, h.score, preview);
    }
    Ok(())
}

fn do_triage(mut tail: Vec<String>) -> Result<(), String> {
    if tail.is_empty() {
        return Err("triage requires CORPUS_CSV".into());
    }
    let corpus = tail.remove(0);
    let mut text: Option<String> = None;
    let mut k = 3usize;
    let mut log: Option<String> = None;
    let mut i = 0;
    while i < tail.len() {
        match tail[i].as_str() {
            "--text" => {
                if i + 1 < tail.len() {
                    text = Some(tail[i + 1].clone());
                    i += 2;
                } else {
                    return Err("--text requires ticket text".into());
                }
            }
            "--k" => {
                if i + 1 < tail.len() {
                    k = tail[i + 1].parse().unwrap_or(k);
                    i += 2;
                } else {
                    return Err("--k requires a number".into());
                }
            }
            "--log" => {
                if i + 1 < tail.len() {
                    log = Some(tail[i + 1].clone());
                    i += 2;
                } else {
                    return Err("--log requires a path".into());
                }
            }
            _ => {
                i += 1;
            }
        }
    }
    let text = text.ok_or_else(|| String::from("triage requires --text TEXT"))?;

    let svc = TriageService::new(ServiceConfig {
        corpus_path: PathBuf::from(&corpus),
        log_path: log.map(PathBuf::from),
        top_k: k,
        ..ServiceConfig::default()
    });
    let report = svc.triage(&text);
    let rendered = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(2);
    }
    let cmd = args.remove(0);
    let result = match cmd.as_str() {
        "prepare" => do_prepare(args),
        "build" => do_build(args),
        "query" => do_query(args),
        "triage" => do_triage(args),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
