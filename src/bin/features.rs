//! Command line tool to inspect tokens, negation marking and lexicon features for sentences

use std::sync::Arc;

use anyhow::anyhow;
use burn_sentiment::{
    cli::features::{opinion_lexicon_dir, valence_lexicon_path},
    features::{CompoundSentimentExtractor, FeatureExtractor, LexiconPolarityExtractor},
    text::{mark_negation, Tokenize, TweetTokenizer},
    utils::hugging_face::load_hf_tokenizer,
};
use log::warn;
use pico_args::Arguments;

const HELP: &str = "\
Usage: features [OPTIONS] SENTENCE...

Arguments:
  SENTENCE             One or more sentences to inspect

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  --hf-tokenizer       Tokenize with a pre-trained Hugging Face tokenizer (e.g., 'bert-base-uncased')
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The top-level data directory
    data_dir: String,

    /// An optional Hugging Face tokenizer
    hf_tokenizer: Option<String>,

    /// The sentences to inspect
    sentences: Vec<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let data_dir = pargs
        .opt_value_from_str(["-d", "--data-dir"])?
        .unwrap_or_else(|| "data".to_string());
    let hf_tokenizer = pargs.opt_value_from_str("--hf-tokenizer")?;

    let sentences = pargs
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("Invalid UTF-8 argument: {:?}", arg))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Args {
        help,
        data_dir,
        hf_tokenizer,
        sentences,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help || args.sentences.is_empty() {
        println!("{}", HELP);
        return Ok(());
    }

    let tokenizer: Arc<dyn Tokenize> = match &args.hf_tokenizer {
        Some(name) => Arc::new(load_hf_tokenizer(name).await?),
        None => Arc::new(TweetTokenizer::default()),
    };

    let (polarity, compound) = futures::join!(
        LexiconPolarityExtractor::load(opinion_lexicon_dir(&args.data_dir), tokenizer.clone()),
        CompoundSentimentExtractor::load(valence_lexicon_path(&args.data_dir)),
    );

    let polarity = polarity
        .map_err(|e| warn!("Skipping opinion lexicon counts: {}", e))
        .ok();
    let compound = compound
        .map_err(|e| warn!("Skipping valence scores: {}", e))
        .ok();

    for (i, sentence) in args.sentences.iter().enumerate() {
        let tokens = tokenizer.tokenize(sentence);
        let marked = mark_negation(&tokens);

        println!(
            "\n=== Sentence {i} ===\
             \n- Text: {sentence}\
             \n- Tokens: {tokens:?}\
             \n- Negation: {marked:?}"
        );

        let documents = [sentence.clone()];

        if let Some(extractor) = &polarity {
            print_row("Opinion lexicon", extractor, &documents)?;
        }

        if let Some(extractor) = &compound {
            print_row("Valence", extractor, &documents)?;
        }
    }

    Ok(())
}

fn print_row<E: FeatureExtractor>(
    title: &str,
    extractor: &E,
    documents: &[String],
) -> anyhow::Result<()> {
    let row = extractor.transform(documents)?.dense_row(0);

    let cells: Vec<String> = extractor
        .feature_names()?
        .iter()
        .zip(row)
        .map(|(name, value)| format!("{name}={value:.4}"))
        .collect();

    println!("- {}: {}", title, cells.join(", "));

    Ok(())
}
