use std::path::PathBuf;

use triage_service::{ServiceConfig, TriageService};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run -p triage-service --example classify_and_search -- <CORPUS_CSV> <TICKET_TEXT>");
        std::process::exit(1);
    }

    let cfg = ServiceConfig {
        corpus_path: PathBuf::from(&args[1]),
        ..ServiceConfig::default()
    };
    let svc = TriageService::new(cfg);

    let report = svc.triage(&args[2]);
    println!("category: {} (confidence {:.2})", report.classification.category, report.classification.confidence);
    println!("tags: {}", report.classification.tags.join(", "));
    if let Some(similar) = &report.classification.similar_tickets {
        println!("Similar tickets: {}", similar.len());
        for (i, s) in similar.iter().enumerate() {
            let preview: String = s.snippet.chars().take(80).collect();
            println!("{:>2}. [row {}] {:.4} {}", i + 1, s.row_index, s.score, preview);
        }
    }
}
