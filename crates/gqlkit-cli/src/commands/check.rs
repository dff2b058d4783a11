use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use gqlkit::parser::ast::Document;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use tokio::task::JoinSet;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for query \
             documents within a directory.",
        long,
        value_delimiter = ',',
    )]
    pub(crate) query_file_exts: Vec<String>,

    #[arg(
        help="Print the parsed fragments and selection trees of every \
             document as JSON.",
        long,
    )]
    pub(crate) print: bool,

    #[arg(
        help="Paths to one or more query documents or directories \
             containing query documents which need to be checked.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    pub(crate) file_or_dir_paths: Vec<PathBuf>,
}

/// The files found under the input paths.
#[derive(Debug, Default)]
pub(crate) struct DocumentPaths {
    pub(crate) file_paths: Vec<PathBuf>,
    pub(crate) num_skipped_files: usize,
    pub(crate) errors: Vec<anyhow::Error>,
}

/// Lowercases each extension and strips any leading `.`.
pub(crate) fn normalize_exts(exts: &[String]) -> HashSet<String> {
    exts.iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Walks every input path and collects the files whose extension is one of
/// `exts`.
///
/// A single file passed directly is always checked, whatever its extension.
pub(crate) fn collect_document_paths(
    inputs: &[PathBuf],
    exts: &HashSet<String>,
) -> DocumentPaths {
    let mut found = DocumentPaths::default();

    log::debug!("Scanning {} input paths...", inputs.len());
    for input in inputs {
        for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::trace!("Failed to walk the filesystem at/under {input:#?}.");
                    found.errors.push(anyhow::Error::new(err).context(format!(
                        "Failed to read {}",
                        input.display(),
                    )));
                    continue
                },
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue
            }

            let matches_ext =
                path.extension()
                    .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
                    .is_some_and(|ext| exts.contains(&ext));
            if matches_ext {
                log::trace!("Found query document at {path:#?}.");
                found.file_paths.push(path.to_path_buf());
            } else {
                found.num_skipped_files += 1;
            }
        }
    }

    if found.file_paths.is_empty()
        && let [single_input] = inputs
        && single_input.is_file() {
        log::warn!(
            "Proceeding to check {single_input:#?} even though it doesn't \
            match any of the --query-file-exts ({}).",
            exts.iter()
                .map(|ext| format!("`{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        found.num_skipped_files = found.num_skipped_files.saturating_sub(1);
        found.file_paths.push(single_input.clone());
    }

    found
}

/// Reads and parses the query document at `path`.
pub(crate) fn check_file(path: &Path) -> anyhow::Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    gqlkit::parser::parse_document(&source)
        .map_err(|err| anyhow::anyhow!("{}: {}", path.display(), err.format_oneline()))
}

/// Parses every file on the blocking pool and returns the results in the
/// order of `file_paths`.
async fn check_files(file_paths: &[PathBuf]) -> Vec<(PathBuf, anyhow::Result<Document>)> {
    let mut tasks = JoinSet::new();
    for (idx, path) in file_paths.iter().cloned().enumerate() {
        tasks.spawn_blocking(move || (idx, check_file(&path)));
    }

    let mut completed = Vec::with_capacity(file_paths.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(checked) => completed.push(checked),
            Err(err) => log::error!("A document check task failed: {err}"),
        }
    }
    in_path_order(file_paths, completed)
}

/// Pairs each path with its result. A path whose check never completed
/// gets an error.
pub(crate) fn in_path_order(
    file_paths: &[PathBuf],
    completed: Vec<(usize, anyhow::Result<Document>)>,
) -> Vec<(PathBuf, anyhow::Result<Document>)> {
    let mut results: Vec<Option<anyhow::Result<Document>>> =
        file_paths.iter().map(|_| None).collect();
    for (idx, result) in completed {
        if let Some(slot) = results.get_mut(idx) {
            *slot = Some(result);
        }
    }
    file_paths.iter()
        .cloned()
        .zip(results)
        .map(|(path, result)| {
            let result = result.unwrap_or_else(|| Err(anyhow::anyhow!(
                "{}: the check did not complete",
                path.display(),
            )));
            (path, result)
        })
        .collect()
}

fn print_document(path: &Path, document: &Document) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to print {}", path.display()))?;
    Ok(format!("# {}\n{json}", path.display()))
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let exts = normalize_exts(&self.query_file_exts);
        let DocumentPaths {
            file_paths,
            num_skipped_files,
            mut errors,
        } = collect_document_paths(&self.file_or_dir_paths, &exts);

        log::debug!("Found {} query documents to check.", file_paths.len());
        if file_paths.is_empty() && errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} No query documents found.",
                output_utils::RED_X,
            ));
        }

        let mut num_operations = 0;
        let mut num_fragments = 0;
        let mut printed = vec![];
        for (path, result) in check_files(&file_paths).await {
            match result {
                Ok(document) => {
                    num_operations += document.operations().len();
                    num_fragments += document.fragments().len();
                    if self.print {
                        match print_document(&path, &document) {
                            Ok(output) => printed.push(output),
                            Err(err) => errors.push(err),
                        }
                    }
                },
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Found {} errors in {} query documents:\n{}",
                output_utils::RED_X,
                errors.len(),
                file_paths.len(),
                errors.iter()
                    .map(|err| format!("  * {err:#}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ));
        }

        let mut output = printed;
        output.push(format!(
            concat!(
                "{} All query documents parsed successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} files with other extensions.\n",
                "  * Found {} operations.\n",
                "  * Found {} fragments.",
            ),
            output_utils::GREEN_CHECK,
            file_paths.len(),
            num_skipped_files,
            num_operations,
            num_fragments,
        ));
        CommandResult::stdout(format_args!("{}", output.join("\n\n")))
    }
}
