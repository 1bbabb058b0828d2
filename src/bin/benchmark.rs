//! Command line tool to benchmark feature sets for sentiment classification

use std::sync::Arc;

use anyhow::anyhow;
use burn::data::dataset::Dataset as _;
use burn_sentiment::{
    cli::{
        benchmark::{self, Config, Outcome},
        datasets::Dataset,
        features::FeatureSet,
    },
    datasets::{imdb, semeval, LoadableDataset},
    models::DefaultBackend,
    pipelines::Item,
    text::{Tokenize, TweetTokenizer},
    utils::hugging_face::load_hf_tokenizer,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: benchmark DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to use ('semeval' or 'imdb')

Options:
  -h, --help           Print help
  -f, --features       Comma separated feature set (e.g., 'ngram,liu,vader', defaults to 'ngram')
  --compare            Benchmark the standard feature sets one after another
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -c, --config         A JSON or YAML benchmark config file
  -n, --num-epochs     Number of epochs to train for
  -b, --batch-size     Batch size
  --max-features       Keep only the most frequent n-grams (unbounded by default, e.g. 100000 for 'imdb')
  --hf-tokenizer       Tokenize with a pre-trained Hugging Face tokenizer (e.g., 'bert-base-uncased')
  --json               Write the reports as JSON to the given path
";

#[derive(Debug)]
struct Args {
    dataset: String,
    features: Option<String>,
    compare: bool,
    data_dir: Option<String>,
    config: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    max_features: Option<usize>,
    hf_tokenizer: Option<String>,
    json: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            features: pargs.opt_value_from_str(["-f", "--features"])?,
            compare: pargs.contains("--compare"),
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            max_features: pargs.opt_value_from_str("--max-features")?,
            hf_tokenizer: pargs.opt_value_from_str("--hf-tokenizer")?,
            json: pargs.opt_value_from_str("--json")?,
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let dataset = Dataset::try_from(args.dataset.as_str())?;

    let mut config = match &args.config {
        Some(path) => Config::load_file(path).await?,
        None => Config::new(),
    };

    if let Some(features) = &args.features {
        config.features = features.to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.to_string();
    }

    if let Some(num_epochs) = args.num_epochs {
        config.classifier.num_epochs = num_epochs;
    }

    if let Some(batch_size) = args.batch_size {
        config.classifier.batch_size = batch_size;
    }

    if let Some(max_features) = args.max_features {
        config.ngram.max_features = Some(max_features);
    }

    let feature_sets = if args.compare {
        FeatureSet::standard()
    } else {
        vec![config.feature_set()?]
    };

    let tokenizer: Arc<dyn Tokenize> = match &args.hf_tokenizer {
        Some(name) => Arc::new(load_hf_tokenizer(name).await?),
        None => Arc::new(TweetTokenizer::default()),
    };

    let outcomes = match dataset {
        Dataset::SemEval => {
            let (train, test) = futures::try_join!(
                semeval::Dataset::load(&config.data_dir, "train"),
                semeval::Dataset::load(&config.data_dir, "test"),
            )?;

            benchmark_all(&config, &feature_sets, tokenizer, &items(&train), &items(&test)).await?
        }
        Dataset::Imdb => {
            let (train, test) = futures::try_join!(
                imdb::Dataset::load_with_seed(&config.data_dir, "train", config.seed),
                imdb::Dataset::load_with_seed(&config.data_dir, "test", config.seed),
            )?;

            benchmark_all(&config, &feature_sets, tokenizer, &items(&train), &items(&test)).await?
        }
    };

    if let Some(path) = &args.json {
        tokio::fs::write(path, serde_json::to_string_pretty(&outcomes)?).await?;

        println!("\nReports written to {}", path);
    }

    Ok(())
}

fn items<I, D: burn::data::dataset::Dataset<I>>(dataset: &D) -> Vec<I> {
    dataset.iter().collect()
}

async fn benchmark_all<I: Item>(
    config: &Config,
    feature_sets: &[FeatureSet],
    tokenizer: Arc<dyn Tokenize>,
    train: &[I],
    test: &[I],
) -> anyhow::Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(feature_sets.len());

    for feature_set in feature_sets {
        let outcome = benchmark::run::<DefaultBackend, I>(
            config,
            feature_set,
            tokenizer.clone(),
            train,
            test,
            Default::default(),
        )
        .await?;

        println!(
            "\n=== Features: {} ({} columns) ===\n{}\n",
            outcome.features, outcome.width, outcome.report
        );

        outcomes.push(outcome);
    }

    Ok(outcomes)
}
