use anyhow::{bail, Context};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use nahw_protocol::Catalogue;
use rkyv::AlignedVec;
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compiles the JSON stage catalogue to an rkyv binary")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

/// Rejects catalogues the engine could not load a session from.
fn check_catalogue(catalogue: &Catalogue) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for stage in &catalogue.stages {
        if !seen.insert(stage.id.as_str()) {
            bail!("duplicate stage id {:?}", stage.id);
        }
        if nahw_parser::words(&stage.sentence).is_empty() {
            bail!("stage {:?} has an empty sentence", stage.id);
        }
    }
    Ok(())
}

fn compile(catalogue: &Catalogue) -> anyhow::Result<AlignedVec> {
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(catalogue)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    let archived = Catalogue::check_archived(&bytes)?;
    if archived.stages.len() != catalogue.stages.len() {
        bail!("archive lost stages");
    }
    Ok(bytes)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    tracing::info!(input = ?cli.input, "reading catalogue");
    let input_data = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;

    let catalogue: Catalogue = serde_json::from_str(&input_data)
        .with_context(|| format!("{} is not a stage catalogue", cli.input.display()))?;
    check_catalogue(&catalogue)?;

    tracing::info!(
        version = catalogue.version,
        stages = catalogue.stages.len(),
        first = catalogue.stages.first().map(|s| s.id.as_str()),
        "compiling catalogue"
    );
    let bytes = compile(&catalogue)?;

    fs::write(&cli.output, &bytes).with_context(|| format!("cannot write {}", cli.output.display()))?;

    tracing::info!(output = ?cli.output, bytes = bytes.len(), "catalogue written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::{Stage, StageCategory};

    fn stage(id: &str, sentence: &str) -> Stage {
        Stage {
            id: id.to_string(),
            number: id.to_string(),
            sentence: sentence.to_string(),
            category: StageCategory::Workbook,
        }
    }

    #[test]
    fn test_compiled_catalogue_is_readable() {
        let catalogue = Catalogue { version: 1, stages: vec![stage("2.3", "هذا الحصار قرصنة دولية واضحة")] };
        let bytes = compile(&catalogue).unwrap();

        let archived = Catalogue::check_archived(&bytes).unwrap();
        let restored = archived.stage("2.3").unwrap();
        assert_eq!(restored.sentence, "هذا الحصار قرصنة دولية واضحة");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalogue = Catalogue { version: 1, stages: vec![stage("1.1", "ولد"), stage("1.1", "كبير")] };
        assert!(check_catalogue(&catalogue).is_err());
    }

    #[test]
    fn test_blank_sentence_rejected() {
        let catalogue = Catalogue { version: 1, stages: vec![stage("1.1", "   ")] };
        assert!(check_catalogue(&catalogue).is_err());
    }

    #[test]
    fn test_bundled_catalogue_parses() {
        let json = include_str!("../../../data/stages.json");
        let catalogue: Catalogue = serde_json::from_str(json).unwrap();
        assert!(!catalogue.stages.is_empty());
        check_catalogue(&catalogue).unwrap();
    }
}
