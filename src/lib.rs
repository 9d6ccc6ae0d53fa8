#[cfg(feature = "cli")]
pub mod args;
pub mod config;
pub mod errors;
pub mod groups;
pub mod normalizer;
pub mod report;
pub mod resolver;
pub mod value;

#[cfg(feature = "cli")]
pub use args::{Cli, CollectArgs, Commands, ComposeOptions, MergeArgs};
pub use config::{ClassDictConfig, DictionaryMode, MergeConfig};
pub use errors::{BoxError, ClassDictError, Result};
pub use normalizer::Normalizer;
pub use report::{MergeReport, ReportBuilder};
pub use resolver::{ConflictResolver, Resolution, TailwindMerger};
pub use value::{ClassDictionary, ClassValue, Thunk};

use once_cell::sync::Lazy;
use rayon::prelude::*;

static DEFAULT_COMPOSER: Lazy<ClassComposer> = Lazy::new(ClassComposer::new);

/// Normalizer and conflict resolver bundled behind the collect/merge operations
pub struct ClassComposer {
    normalizer: Normalizer,
    resolver: Box<dyn ConflictResolver>,
}

impl Default for ClassComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassComposer {
    /// Composer with the default configuration
    pub fn new() -> Self {
        Self::from_config(&ClassDictConfig::default())
    }

    /// Composer using the configured dictionary mode, key splitting and merger
    pub fn from_config(config: &ClassDictConfig) -> Self {
        Self {
            normalizer: Normalizer::from_config(config),
            resolver: Box::new(TailwindMerger::new(config.merge.clone())),
        }
    }

    /// Replace the conflict resolver
    pub fn with_resolver<R: ConflictResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Flatten the values into an ordered token sequence
    pub fn collect(&self, values: &[ClassValue]) -> Result<Vec<String>> {
        self.normalizer.normalize_all(values)
    }

    /// `collect`, then resolve conflicts into a single class string
    pub fn collect_and_merge(&self, values: &[ClassValue]) -> Result<String> {
        let tokens = self.collect(values)?;
        Ok(self.merge_tokens(&tokens))
    }

    /// Invoke the callback once and merge the dictionary it returns
    pub fn collect_from_callback<F>(&self, callback: F) -> Result<String>
    where
        F: FnOnce() -> ClassDictionary,
    {
        let dict = callback();
        self.collect_and_merge(&[ClassValue::Dictionary(dict)])
    }

    /// Tokens of `dict` followed by one space-joined token holding the
    /// trailing overrides, if they produce any classes.
    ///
    /// The overrides go through the same normalizer as `dict`, so a
    /// dictionary among them follows the configured dictionary mode: under
    /// `KeyAsClass`, `{"foo": "bar"}` contributes `bar`, not `foo`.
    pub fn collect_dict(&self, dict: &ClassDictionary, rest: &[ClassValue]) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        self.normalizer.normalize_dictionary(dict, &mut tokens)?;

        let overrides = self.normalizer.normalize_all(rest)?;
        if !overrides.is_empty() {
            tokens.push(overrides.join(" "));
        }
        Ok(tokens)
    }

    /// `collect_dict`, then resolve conflicts into a single class string
    pub fn merge_dict(&self, dict: &ClassDictionary, rest: &[ClassValue]) -> Result<String> {
        let tokens = self.collect_dict(dict, rest)?;
        Ok(self.merge_tokens(&tokens))
    }

    /// Run the resolver over an already collected token sequence
    pub fn merge_tokens(&self, tokens: &[String]) -> String {
        self.resolver.merge(tokens)
    }

    /// Merge independent inputs in parallel; results keep input order
    pub fn collect_batch(&self, inputs: &[Vec<ClassValue>]) -> Vec<Result<String>> {
        inputs
            .par_iter()
            .map(|values| self.collect_and_merge(values))
            .collect()
    }
}

/// Flatten the values into an ordered token sequence using the default configuration
pub fn collect(values: &[ClassValue]) -> Result<Vec<String>> {
    DEFAULT_COMPOSER.collect(values)
}

/// `collect`, then resolve Tailwind conflicts with the default merger
pub fn collect_and_merge(values: &[ClassValue]) -> Result<String> {
    DEFAULT_COMPOSER.collect_and_merge(values)
}

/// Invoke the callback once and merge the dictionary it returns
pub fn collect_from_callback<F>(callback: F) -> Result<String>
where
    F: FnOnce() -> ClassDictionary,
{
    DEFAULT_COMPOSER.collect_from_callback(callback)
}

/// Dictionary tokens followed by the trailing overrides joined into one token.
///
/// Dictionaries among the overrides use the same dictionary mode as `dict`.
pub fn collect_dict(dict: &ClassDictionary, rest: &[ClassValue]) -> Result<Vec<String>> {
    DEFAULT_COMPOSER.collect_dict(dict, rest)
}

/// `collect_dict`, then resolve Tailwind conflicts with the default merger
pub fn merge_dict(dict: &ClassDictionary, rest: &[ClassValue]) -> Result<String> {
    DEFAULT_COMPOSER.merge_dict(dict, rest)
}

/// Parse a JSON document into positional arguments.
///
/// A top-level array is the argument list; any other value is a single
/// argument. Blank input yields no arguments.
pub fn parse_arguments(input: &str) -> Result<Vec<ClassValue>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<ClassValue>(input)? {
        ClassValue::List(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Collect and resolve `values` under `config`, recording the outcome in a report.
///
/// Processing time covers normalization and conflict resolution.
pub fn build_report(config: &ClassDictConfig, values: &[ClassValue]) -> Result<MergeReport> {
    let builder = ReportBuilder::new()
        .with_dictionary_mode(config.dictionary_mode)
        .with_merge_enabled(config.merge.enabled);

    let tokens = Normalizer::from_config(config).normalize_all(values)?;
    let resolution = TailwindMerger::new(config.merge.clone()).resolve(&tokens);

    Ok(builder.with_tokens(tokens).with_resolution(resolution).build())
}

/// Build the effective configuration from an optional file and CLI overrides
#[cfg(feature = "cli")]
pub fn resolve_config(options: &ComposeOptions) -> Result<ClassDictConfig> {
    let mut config = match &options.config {
        Some(path) => ClassDictConfig::from_file(path)?,
        None => ClassDictConfig::default(),
    };

    if let Some(mode) = options.mode {
        config.dictionary_mode = mode;
    }
    if options.no_split_keys {
        config.split_keys = false;
    }
    if options.no_merge {
        config.merge.enabled = false;
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Render the `collect` command output for the given stdin content
#[cfg(feature = "cli")]
pub fn run_collect(input: &str, args: &CollectArgs) -> Result<String> {
    let config = resolve_config(&args.options)?;
    let composer = ClassComposer::from_config(&config);
    let tokens = composer.collect(&parse_arguments(input)?)?;

    if args.json {
        Ok(serde_json::to_string(&tokens)?)
    } else {
        Ok(tokens.join("\n"))
    }
}

/// Render the `merge` command output for the given stdin content
#[cfg(feature = "cli")]
pub fn run_merge(input: &str, args: &MergeArgs) -> Result<String> {
    args.validate().map_err(ClassDictError::InvalidInput)?;

    let config = resolve_config(&args.options)?;
    let composer = ClassComposer::from_config(&config);

    if args.lines {
        let inputs = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_arguments)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = inputs.len(), "merging input lines in parallel");

        let merged = composer
            .collect_batch(&inputs)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        return Ok(merged.join("\n"));
    }

    let values = parse_arguments(input)?;
    if args.report {
        let report = build_report(&config, &values)?;
        return Ok(report.to_pretty_json()?);
    }

    composer.collect_and_merge(&values)
}

/// Handle collect command - read JSON from stdin, write tokens to stdout
#[cfg(feature = "cli")]
pub async fn handle_collect_command(args: CollectArgs) -> Result<()> {
    let input = read_stdin().await?;
    let output = run_collect(&input, &args)?;
    write_stdout(&output).await
}

/// Handle merge command - read JSON from stdin, write the merged class string to stdout
#[cfg(feature = "cli")]
pub async fn handle_merge_command(args: MergeArgs) -> Result<()> {
    let input = read_stdin().await?;
    let output = run_merge(&input, &args)?;
    write_stdout(&output).await
}

#[cfg(feature = "cli")]
async fn read_stdin() -> Result<String> {
    use tokio::io::{self, AsyncReadExt};

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .await
        .map_err(|e| ClassDictError::InvalidInput(format!("Failed to read from stdin: {}", e)))?;
    Ok(input)
}

#[cfg(feature = "cli")]
async fn write_stdout(output: &str) -> Result<()> {
    use tokio::io::{self, AsyncWriteExt};

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    if !output.is_empty() {
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}
