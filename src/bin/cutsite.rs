use cutsite::{
    about,
    digest::RestrictionAnalysis,
    dna_sequence::DNAsequence,
    enzymes::Enzymes,
    id_registry::IdRegistry,
    restriction_enzyme::{EnzymeRecord, RestrictionEnzyme},
    restriction_site::sort_by_position,
    settings::{AnalysisSettings, OutputFormat},
    site_export,
};
use env_logger::Env;
use log::info;
use std::{env, fs, path::Path};

fn usage() {
    eprintln!(
        "Usage:\n  \
  cutsite --version\n  \
  cutsite [--config PATH] [--verbose] digest FASTA [--circular|--linear] [--enzymes PATH.json] [--names A,B] [--csv] [--output PATH]\n  \
  cutsite [--verbose] enzymes [--enzymes PATH.json]\n  \
  cutsite [--verbose] composition FASTA\n  \
  cutsite [--verbose] import-legacy TEXT OUTPUT.json\n  \
  cutsite [--verbose] add-enzyme STORE.json NAME ORIGIN SENSE ANTISENSE\n  \
  cutsite [--verbose] remove-enzyme STORE.json NAME\n\n  \
  Targets are written with one '^' per strand, e.g. G^AATTC CTTAA^G"
    );
}

struct GlobalArgs {
    config_path: Option<String>,
    verbose: bool,
    cmd_idx: usize,
}

fn parse_global_args(args: &[String]) -> Result<GlobalArgs, String> {
    let mut global = GlobalArgs {
        config_path: None,
        verbose: false,
        cmd_idx: 1,
    };
    while let Some(arg) = args.get(global.cmd_idx) {
        match arg.as_str() {
            "--verbose" | "-v" => {
                global.verbose = true;
                global.cmd_idx += 1;
            }
            "--config" => {
                let path = args
                    .get(global.cmd_idx + 1)
                    .ok_or("Missing path for --config")?;
                global.config_path = Some(path.clone());
                global.cmd_idx += 2;
            }
            _ => break,
        }
    }
    Ok(global)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}

fn option_value<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str, String> {
    args.get(idx + 1)
        .map(|v| v.as_str())
        .ok_or_else(|| format!("Missing value for {flag}"))
}

fn load_sequences(path: &str) -> Result<Vec<DNAsequence>, String> {
    let mut registry = IdRegistry::new();
    let sequences = DNAsequence::from_fasta_file(&mut registry, path)
        .map_err(|e| format!("Could not read FASTA file '{path}': {e}"))?;
    if sequences.is_empty() {
        return Err(format!("No sequences found in '{path}'"));
    }
    info!("Read {} sequence(s) from '{path}'", registry.total_sequences());
    Ok(sequences)
}

fn digest(global: &GlobalArgs, args: &[String]) -> Result<(), String> {
    let mut settings = match &global.config_path {
        Some(path) => AnalysisSettings::load_from_path(path).map_err(|e| format!("{e:#}"))?,
        None => AnalysisSettings::default(),
    };
    let mut fasta_path = None;
    let mut output_path = None;
    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "--circular" => settings.circular = true,
            "--linear" => settings.circular = false,
            "--csv" => settings.output = OutputFormat::Csv,
            "--enzymes" => {
                settings.enzymes_path = Some(option_value(args, idx, arg)?.to_string());
                idx += 1;
            }
            "--names" => {
                settings.enzyme_names = option_value(args, idx, arg)?
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
                idx += 1;
            }
            "--output" => {
                output_path = Some(option_value(args, idx, arg)?.to_string());
                idx += 1;
            }
            _ if arg.starts_with("--") => return Err(format!("Unknown option '{arg}'")),
            _ if fasta_path.is_none() => fasta_path = Some(arg.to_string()),
            _ => return Err(format!("Unexpected argument '{arg}'")),
        }
        idx += 1;
    }
    let fasta_path = fasta_path.ok_or("digest requires a FASTA file")?;

    let sequences = load_sequences(&fasta_path)?;
    let mut registry = IdRegistry::new();
    let enzymes = settings
        .enzymes()
        .and_then(|store| store.build(&mut registry).map_err(Into::into))
        .map_err(|e| format!("{e:#}"))?;
    let topology = settings.topology();

    let mut analysis = RestrictionAnalysis::new();
    let mut report = String::new();
    for sequence in &sequences {
        let mut sites = analysis.run(sequence, &enzymes, topology);
        if settings.sort_by_position {
            sort_by_position(&mut sites);
        }
        if sequences.len() > 1 && settings.output == OutputFormat::Text {
            report.push_str(&format!(">{}\n", sequence.label()));
        }
        let rendered = match settings.output {
            OutputFormat::Text => site_export::render_text(&sites),
            OutputFormat::Csv if sequences.len() > 1 => {
                site_export::render_labeled_csv(sequence.label(), &sites)
                    .map_err(|e| e.to_string())?
            }
            OutputFormat::Csv => site_export::render_csv(&sites).map_err(|e| e.to_string())?,
        };
        report.push_str(&rendered);
    }

    match output_path {
        Some(path) => {
            fs::write(&path, report)
                .map_err(|e| format!("Could not write report '{path}': {e}"))?;
            info!("Wrote {} report(s) to '{path}'", sequences.len());
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn load_store(path: Option<&str>) -> Result<Enzymes, String> {
    match path {
        Some(path) => Enzymes::load_from_path(path)
            .map_err(|e| format!("Could not load enzymes from '{path}': {e}")),
        None => Enzymes::builtin().map_err(|e| e.to_string()),
    }
}

fn list_enzymes(args: &[String]) -> Result<(), String> {
    let path = match args.first().map(|a| a.as_str()) {
        Some("--enzymes") => Some(option_value(args, 0, "--enzymes")?),
        Some(other) => return Err(format!("Unexpected argument '{other}'")),
        None => None,
    };
    let mut registry = IdRegistry::new();
    let enzymes = load_store(path)?
        .build(&mut registry)
        .map_err(|e| e.to_string())?;
    let blocks: Vec<String> = enzymes.iter().map(|re| re.to_string()).collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn composition(args: &[String]) -> Result<(), String> {
    let path = args.first().ok_or("composition requires a FASTA file")?;
    let blocks: Vec<String> = load_sequences(path)?
        .iter()
        .map(|seq| seq.to_string())
        .collect();
    println!("{}", blocks.join("\n"));
    Ok(())
}

fn import_legacy(args: &[String]) -> Result<(), String> {
    let [source, target] = args else {
        return Err("import-legacy requires: TEXT OUTPUT.json".to_string());
    };
    let enzymes = Enzymes::from_legacy_path(source)
        .map_err(|e| format!("Could not read legacy file '{source}': {e}"))?;
    enzymes
        .save_to_path(target)
        .map_err(|e| format!("Could not write '{target}': {e}"))?;
    println!("Imported {} enzyme(s) from '{source}' into '{target}'", enzymes.len());
    Ok(())
}

fn add_enzyme(args: &[String]) -> Result<(), String> {
    let [store_path, name, origin, sense, antisense] = args else {
        return Err("add-enzyme requires: STORE.json NAME ORIGIN SENSE ANTISENSE".to_string());
    };
    let mut store = if Path::new(store_path).exists() {
        load_store(Some(store_path.as_str()))?
    } else {
        Enzymes::default()
    };
    let record = EnzymeRecord::from_marked_target(name, Some(origin.as_str()), sense, antisense);
    RestrictionEnzyme::new(&mut IdRegistry::new(), &record).map_err(|e| e.to_string())?;
    store.add(record).map_err(|e| e.to_string())?;
    store
        .save_to_path(store_path)
        .map_err(|e| format!("Could not write '{store_path}': {e}"))?;
    println!("Added '{name}' to '{store_path}'");
    Ok(())
}

fn remove_enzyme(args: &[String]) -> Result<(), String> {
    let [store_path, name] = args else {
        return Err("remove-enzyme requires: STORE.json NAME".to_string());
    };
    let mut store = load_store(Some(store_path.as_str()))?;
    store
        .remove(name)
        .ok_or_else(|| format!("Enzyme '{name}' not found in '{store_path}'"))?;
    store
        .save_to_path(store_path)
        .map_err(|e| format!("Could not write '{store_path}': {e}"))?;
    println!("Removed '{name}' from '{store_path}'");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let global = parse_global_args(&args)?;
    init_logging(global.verbose);
    let Some(command) = args.get(global.cmd_idx) else {
        usage();
        return Err("Missing command".to_string());
    };
    let rest = &args[global.cmd_idx + 1..];

    match command.as_str() {
        "digest" => digest(&global, rest),
        "enzymes" => list_enzymes(rest),
        "composition" => composition(rest),
        "import-legacy" => import_legacy(rest),
        "add-enzyme" => add_enzyme(rest),
        "remove-enzyme" => remove_enzyme(rest),
        _ => {
            usage();
            Err(format!("Unknown command '{command}'"))
        }
    }
}
