//! End-to-end conversion: load, validate, build the header, write.

use std::path::{Path, PathBuf};

use cvm_common::{PropertyKind, QueryDescriptor};
use tracing::{info, warn};

use crate::config::{FlattenConfig, Topology};
use crate::emit::{write_table_file, HeaderBlock};
use crate::error::{Result, TableError, ValidationError};
use crate::flatten::TableFlattener;
use crate::header::{build_header, HeaderContext};
use crate::loader::{load_descriptor, load_grid, load_profile_samples};
use crate::types::PropertyGrid;
use crate::validate::GridDescriptor;
use crate::variant::ConversionVariant;

/// A data file and the descriptor written alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPair {
    pub data: PathBuf,
    pub descriptor: PathBuf,
}

impl InputPair {
    pub fn new(data: impl Into<PathBuf>, descriptor: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Group command-line file arguments into (data, descriptor) pairs.
pub fn pair_arguments(variant: ConversionVariant, args: &[PathBuf]) -> Result<Vec<InputPair>> {
    if args.len() != variant.input_count() {
        return Err(TableError::Usage(format!(
            "expected {} file arguments, got {}\n  {}",
            variant.input_count(),
            args.len(),
            variant.usage()
        )));
    }

    Ok(args
        .chunks(2)
        .map(|pair| InputPair::new(pair[0].clone(), pair[1].clone()))
        .collect())
}

/// A fully validated conversion, ready to be written.
#[derive(Debug)]
pub struct PreparedTable {
    variant: ConversionVariant,
    config: FlattenConfig,
    descriptor: GridDescriptor,
    grids: Vec<PropertyGrid>,
    header: HeaderBlock,
    output: PathBuf,
}

impl PreparedTable {
    /// Load and validate all inputs and derive the output path.
    ///
    /// Nothing is written; every validation failure surfaces here.
    pub fn prepare(variant: ConversionVariant, inputs: &[InputPair]) -> Result<Self> {
        if inputs.len() != variant.pair_count() {
            return Err(TableError::Usage(variant.usage()));
        }

        let config = variant.flatten_config();
        config.validate()?;

        let queries = inputs
            .iter()
            .map(|pair| load_descriptor(&pair.descriptor))
            .collect::<Result<Vec<_>>>()?;

        let descriptor = GridDescriptor::from_query(config.topology, &queries[0])?;
        check_combined_kinds(variant, &queries)?;

        let grids = load_grids(variant, &descriptor, inputs)?;
        // Grid checks happen here so nothing is written for a bad input.
        TableFlattener::new(config, &descriptor, &grids)?;

        let output = variant.output_path(&inputs[0].data);
        if inputs
            .iter()
            .any(|pair| same_path(&pair.data, &output) || same_path(&pair.descriptor, &output))
        {
            return Err(ValidationError::OutputCollision(output).into());
        }

        let header = build_header(&HeaderContext {
            variant,
            queries: &queries,
            inputs,
            descriptor: &descriptor,
            output: &output,
        })?;

        info!(
            variant = %variant,
            output = %output.display(),
            property = ?descriptor.property,
            points = descriptor.declared_points,
            "Validated conversion"
        );

        Ok(Self {
            variant,
            config,
            descriptor,
            grids,
            header,
            output,
        })
    }

    pub fn variant(&self) -> ConversionVariant {
        self.variant
    }

    /// Destination of the table.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn header(&self) -> &HeaderBlock {
        &self.header
    }

    /// Write the table, returning the number of data rows.
    pub fn write(&self) -> Result<usize> {
        let flattener = TableFlattener::new(self.config, &self.descriptor, &self.grids)?;
        let columns = if self.variant.emits_column_names() {
            flattener.column_names()
        } else {
            None
        };

        let rows = write_table_file(
            &self.output,
            &self.header,
            columns.as_deref(),
            flattener.rows(),
            self.config.number_format,
        )?;

        info!(output = %self.output.display(), rows, "Wrote CSV table");
        Ok(rows)
    }
}

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub rows_written: usize,
}

/// Validate and convert in one step.
pub fn convert(variant: ConversionVariant, inputs: &[InputPair]) -> Result<ConversionReport> {
    let prepared = PreparedTable::prepare(variant, inputs)?;
    let rows_written = prepared.write()?;
    Ok(ConversionReport {
        output: prepared.output,
        rows_written,
    })
}

/// Every descriptor of a combined conversion must name a known property.
///
/// Column labels come from argument order, so a descriptor for a different
/// property than its slot is only reported.
fn check_combined_kinds(variant: ConversionVariant, queries: &[QueryDescriptor]) -> Result<()> {
    if !variant.is_triple() {
        return Ok(());
    }
    for (expected, query) in PropertyKind::TRIPLE.iter().zip(queries) {
        let kind = query.property_kind()?;
        if kind != *expected {
            warn!(
                expected = %expected,
                found = %kind,
                "Descriptor property does not match its argument position"
            );
        }
    }
    Ok(())
}

fn load_grids(
    variant: ConversionVariant,
    descriptor: &GridDescriptor,
    inputs: &[InputPair],
) -> Result<Vec<PropertyGrid>> {
    if variant.topology() == Topology::Profile {
        return load_profile_samples(&inputs[0].data);
    }

    inputs
        .iter()
        .enumerate()
        .map(|(idx, pair)| {
            let kind = if variant.is_triple() {
                PropertyKind::TRIPLE[idx]
            } else {
                descriptor.grid_property()?
            };
            Ok(PropertyGrid::new(kind, load_grid(&pair.data)?))
        })
        .collect()
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_arguments() {
        let args: Vec<PathBuf> = ["a.bin", "a.json"].iter().map(PathBuf::from).collect();
        let pairs = pair_arguments(ConversionVariant::CrossSection, &args).unwrap();
        assert_eq!(pairs, vec![InputPair::new("a.bin", "a.json")]);

        let err = pair_arguments(ConversionVariant::CrossSectionAll, &args).unwrap_err();
        assert!(matches!(err, TableError::Usage(_)));
    }

    #[test]
    fn test_prepare_checks_pair_count() {
        let err = PreparedTable::prepare(ConversionVariant::HorizontalSlice, &[]).unwrap_err();
        assert!(matches!(err, TableError::Usage(_)));
    }
}
