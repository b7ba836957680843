extern crate clap;
extern crate senseres;
extern crate serde;
extern crate serde_json;
extern crate tracing;
extern crate tracing_subscriber;

use clap::{Arg, App, ArgMatches};
use std::io;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use senseres::{Analyzer, Error, IdiomCatalog, NoFallback, RankerConfig, ResolverConfig, Result,
               SelectionOrder, SenseResolver, StaticDictionary, TagLexicon, WordNet};

fn config(args : &ArgMatches) -> ResolverConfig {
    let top_n = args.value_of("top")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(3);
    let iterations = args.value_of("iterations")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(20);
    let order = if args.is_present("highest-first") {
        SelectionOrder::HighestFirst
    } else {
        SelectionOrder::LowestFirst
    };
    ResolverConfig {
        top_n : top_n,
        rank_idiom_senses : args.is_present("rank-idiom-senses"),
        ranker : RankerConfig { iterations : iterations, order : order, ..RankerConfig::default() }
    }
}

fn print_json<T : serde::Serialize>(value : &T) -> Result<()> {
    let line = serde_json::to_string(value)
        .map_err(|e| Error::Json { what : "response".to_string(), source : e })?;
    println!("{}", line);
    Ok(())
}

fn run(args : &ArgMatches) -> Result<()> {
    let wordnet_file = args.value_of("wordnet")
        .unwrap_or("wordnet.json");

    let idioms_file = args.value_of("idioms")
        .unwrap_or("expressions.json");

    let lexicon = match args.value_of("tags") {
        Some(f) => TagLexicon::from_file(f)?,
        None => TagLexicon::default()
    };

    let wordnet = WordNet::from_file(wordnet_file)?;
    let analyzer = Analyzer::new(&wordnet, lexicon);
    let catalog = Arc::new(IdiomCatalog::from_file(idioms_file, &analyzer)?);
    let resolver = SenseResolver::new(&wordnet, &analyzer, catalog).with_config(config(args));
    let resolver = match args.value_of("fallback") {
        Some(f) => resolver.with_fallback(StaticDictionary::from_file(f)?),
        None => resolver.with_fallback(NoFallback)
    };

    if args.is_present("batch") {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let answered = resolver.resolve_batch(stdin.lock(), stdout.lock())?;
        info!("Answered {} requests", answered);
        Ok(())
    } else {
        let sentence = args.value_of("sentence").unwrap_or("");
        let word = args.value_of("word").unwrap_or("");
        let order = args.value_of("order")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0);
        print_json(&resolver.resolve(sentence, word, order)?)
    }
}

fn main() {
    let args = App::new("Sense Resolver")
        .version("0.1")
        .author("John P. McCrae <john@mccr.ae>")
        .about("Finds the WordNet senses and idioms of a word in a sentence")
        .arg(Arg::with_name("wordnet")
             .long("wordnet")
             .value_name("wordnet.json")
             .help("The location of the WordNet JSON file (may be .bz2 compressed)")
             .takes_value(true))
        .arg(Arg::with_name("idioms")
             .long("idioms")
             .value_name("expressions.json")
             .help("The idiom definitions")
             .takes_value(true))
        .arg(Arg::with_name("tags")
             .long("tags")
             .value_name("tags.json")
             .help("A word to Penn tag lexicon used by the tagger")
             .takes_value(true))
        .arg(Arg::with_name("fallback")
             .long("fallback")
             .value_name("dictionary.json")
             .help("Definitions for words that are not in WordNet")
             .takes_value(true))
        .arg(Arg::with_name("sentence")
             .short("s")
             .long("sentence")
             .help("The sentence containing the word")
             .takes_value(true)
             .required_unless("batch"))
        .arg(Arg::with_name("word")
             .short("w")
             .long("word")
             .help("The word to resolve")
             .takes_value(true)
             .required_unless("batch"))
        .arg(Arg::with_name("order")
             .short("o")
             .long("order")
             .value_name("N")
             .help("Which occurrence of the word is meant, counting from 0")
             .takes_value(true))
        .arg(Arg::with_name("top")
             .long("top")
             .value_name("N")
             .help("How many senses to return")
             .takes_value(true))
        .arg(Arg::with_name("iterations")
             .long("iterations")
             .value_name("N")
             .help("Number of ranking passes")
             .takes_value(true))
        .arg(Arg::with_name("highest-first")
             .long("highest-first")
             .help("Return the highest scoring senses instead of the lowest"))
        .arg(Arg::with_name("rank-idiom-senses")
             .long("rank-idiom-senses")
             .help("Order the definitions of a matched idiom by the sentence context"))
        .arg(Arg::with_name("batch")
             .long("batch")
             .help("Read JSON requests {\"sentence\",\"word\",\"word_order\"} from stdin, one per line"))
        .arg(Arg::with_name("log-level")
             .long("log-level")
             .value_name("LEVEL")
             .help("Log filter used when RUST_LOG is not set, e.g., debug")
             .takes_value(true))
        .get_matches();

    let level = args.value_of("log-level").unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                         .unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
