//! Header blocks of the emitted tables.
//!
//! Each tool has its own key set; downstream readers match on these exact
//! keys, so spelling and capitalisation differ between tools on purpose.

use std::path::Path;

use cvm_common::{ProfileMode, PropertyKind, QueryDescriptor};

use crate::emit::HeaderBlock;
use crate::error::ValidationError;
use crate::pipeline::InputPair;
use crate::validate::{GridAxes, GridDescriptor};
use crate::variant::ConversionVariant;

/// Everything a header is built from.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub variant: ConversionVariant,
    /// Descriptors in argument order (vp, vs, density for combined tables).
    pub queries: &'a [QueryDescriptor],
    pub inputs: &'a [InputPair],
    pub descriptor: &'a GridDescriptor,
    pub output: &'a Path,
}

type HeaderResult = Result<HeaderBlock, ValidationError>;

/// Build the header block for `ctx.variant`.
pub fn build_header(ctx: &HeaderContext<'_>) -> HeaderResult {
    let query = ctx
        .queries
        .first()
        .ok_or_else(|| ValidationError::InvalidConfig("no descriptors".to_string()))?;

    match ctx.variant {
        ConversionVariant::CrossSection => cross_section_wide(ctx, query),
        ConversionVariant::CrossSectionLine => cross_section_line(ctx, query),
        ConversionVariant::CrossSectionAll => cross_section_all(ctx, query),
        ConversionVariant::HorizontalSlice => horizontal_slice_wide(ctx, query),
        ConversionVariant::HorizontalSliceLine => horizontal_slice_line(ctx, query),
        ConversionVariant::HorizontalSliceAll => horizontal_slice_all(ctx, query),
        ConversionVariant::VerticalProfile => vertical_profile(ctx, query),
        ConversionVariant::Ucvm1d => one_d_profile(ctx, query),
    }
}

fn input_files(ctx: &HeaderContext<'_>) -> String {
    ctx.inputs
        .iter()
        .map(|pair| format!("{} {}", pair.data.display(), pair.descriptor.display()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// (depth points, horizontal points) of a cross section.
fn cross_section_counts(descriptor: &GridDescriptor) -> (usize, usize) {
    match &descriptor.axes {
        GridAxes::CrossSection { depth, lat, .. } => (depth.len(), lat.len()),
        _ => (0, 0),
    }
}

/// (longitude points, latitude points) of a horizontal slice.
fn slice_counts(descriptor: &GridDescriptor) -> (usize, usize) {
    match &descriptor.axes {
        GridAxes::HorizontalSlice { lat, lon } => (lon.len(), lat.len()),
        _ => (0, 0),
    }
}

fn property_legend() -> String {
    PropertyKind::TRIPLE
        .iter()
        .map(|k| k.combined_label())
        .collect::<Vec<_>>()
        .join(",")
}

fn combined_statistics(header: &mut HeaderBlock, queries: &[QueryDescriptor]) -> Result<(), ValidationError> {
    for (kind, query) in PropertyKind::TRIPLE.iter().zip(queries) {
        header
            .field(&format!("{} Min_v", kind), query.text("min")?)
            .field(&format!("{} Max_v", kind), query.text("max")?)
            .field(&format!("{} Mean_v", kind), query.text("mean")?);
    }
    Ok(())
}

fn endpoints(header: &mut HeaderBlock, query: &QueryDescriptor, lowercase: bool) -> Result<(), ValidationError> {
    for key in ["lat1", "lon1", "lat2", "lon2"] {
        let label = if lowercase {
            key.to_string()
        } else {
            let mut chars = key.chars();
            chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        };
        header.field(&label, query.text(key)?);
    }
    Ok(())
}

fn cross_section_wide(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (depth_pts, horizontal_pts) = cross_section_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", query.text("data_type")?)
        .field("Start_depth(m)", query.text("starting_depth")?)
        .field("End_depth(m)", query.text("ending_depth")?)
        .field("Vert_spacing(m)", query.text("vertical_spacing")?)
        .field("Depth_pts", depth_pts)
        .field("Horizontal_pts", horizontal_pts)
        .field("Total_pts", query.text("datapoints")?)
        .field("Min_v", query.text("min")?)
        .field("Max_v", query.text("max")?)
        .field("Mean_v", query.text("mean")?)
        .field("Num_x", query.text("num_x")?)
        .field("Num_y", query.text("num_y")?);
    endpoints(&mut header, query, false)?;
    header.field("Units", ctx.descriptor.grid_property()?.display_label());
    Ok(header)
}

fn cross_section_line(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (depth_pts, horizontal_pts) = cross_section_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", query.text("data_type")?)
        .field("Start_depth(m)", query.text("starting_depth")?)
        .field("End_depth(m)", query.text("ending_depth")?)
        .field("Vert_spacing(m)", query.text("vertical_spacing")?)
        .field("Depth_pts", depth_pts)
        .field("Horizontal_pts", horizontal_pts)
        .field("Total_pts", query.text("datapoints")?)
        .field("min_v", query.text("min")?)
        .field("max_v", query.text("max")?)
        .field("mean_v", query.text("mean")?)
        .field("num_x", query.text("num_x")?)
        .field("num_y", query.text("num_y")?);
    endpoints(&mut header, query, true)?;
    header.line(format!(
        "lon,lat,depth(m),{}",
        ctx.descriptor.grid_property()?.display_label()
    ));
    Ok(header)
}

fn cross_section_all(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (depth_pts, horizontal_pts) = cross_section_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", "vp,vs,density")
        .field("Start_depth(m)", query.text("starting_depth")?)
        .field("End_depth(m)", query.text("ending_depth")?)
        .field("Vert_spacing(m)", query.text("vertical_spacing")?)
        .field("Horizontal_spacing(m)", query.text("horizontal_spacing")?)
        .field("Depth_pts", depth_pts)
        .field("Horizontal_pts", horizontal_pts)
        .field("Total_pts", query.text("datapoints")?);
    combined_statistics(&mut header, ctx.queries)?;
    header
        .field("Num_x", query.text("num_x")?)
        .field("Num_y", query.text("num_y")?);
    endpoints(&mut header, query, false)?;
    header.line(format!("Lon,Lat,Depth(m),{}", property_legend()));
    Ok(header)
}

fn horizontal_slice_wide(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (lon_pts, lat_pts) = slice_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", query.text("data_type")?)
        .field("Depth(m)", query.text("depth")?)
        .field("Spacing(m)", query.text("spacing")?)
        .field("Lon_pts", lon_pts)
        .field("Lat_pts", lat_pts)
        .field("Total_pts", query.text("datapoints")?)
        .field("Units", ctx.descriptor.grid_property()?.display_label());
    Ok(header)
}

fn horizontal_slice_line(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (lon_pts, lat_pts) = slice_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", query.text("data_type")?)
        .field("Depth(m)", query.text("depth")?)
        .field("Spacing(degree)", query.text("spacing")?)
        .field("Lon_pts", lon_pts)
        .field("Lat_pts", lat_pts)
        .field("data_points", query.text("datapoints")?)
        .field("min_v", query.text("min")?)
        .field("max_v", query.text("max")?)
        .field("mean_v", query.text("mean")?);
    endpoints(&mut header, query, true)?;
    header.line(format!("lon,lat,{}", ctx.descriptor.grid_property()?.display_label()));
    Ok(header)
}

fn horizontal_slice_all(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let (lon_pts, lat_pts) = slice_counts(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("Title", query.text("title")?)
        .field("CVM(abbr)", &query.cvm)
        .field("Data_type", "vp,vs,density")
        .field("Depth(m)", query.text("depth")?)
        .field("Spacing(degree)", query.text("spacing")?)
        .field("Lon_pts", lon_pts)
        .field("Lat_pts", lat_pts)
        .field("Total_pts", query.text("datapoints")?);
    combined_statistics(&mut header, ctx.queries)?;
    endpoints(&mut header, query, false)?;
    header.line(format!("Lon,Lat,{}", property_legend()));
    Ok(header)
}

fn profile_mode(descriptor: &GridDescriptor) -> ProfileMode {
    match &descriptor.axes {
        GridAxes::Profile { mode, .. } => *mode,
        _ => ProfileMode::Depth,
    }
}

fn vertical_profile(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let mode = profile_mode(ctx.descriptor);
    let mut header = HeaderBlock::new();
    header
        .compact_field("Input Data files", input_files(ctx))
        .compact_field("Title", ctx.output.display())
        .compact_field("CVM(abbr)", &query.cvm)
        .compact_field("Lat", query.text("lat1")?)
        .compact_field("Lon", query.text("lon1")?)
        .compact_field(&format!("Start_{}(m)", mode.noun()), query.text(mode.start_key())?)
        .compact_field(&format!("End_{}(m)", mode.noun()), query.text(mode.end_key())?)
        .compact_field("Vert_spacing(m)", query.text("vertical_spacing")?);
    if let Some(comment) = &query.comment {
        header.compact_field("Comment", comment);
    }
    Ok(header)
}

fn one_d_profile(ctx: &HeaderContext<'_>, query: &QueryDescriptor) -> HeaderResult {
    let mode = profile_mode(ctx.descriptor);
    let name = query.comment.as_deref().unwrap_or(&query.cvm);
    let mut header = HeaderBlock::new();
    header
        .field("Input Data files", input_files(ctx))
        .field("CVM_name", format!("{} (abbr: {})", name, query.cvm))
        .line(format!(
            "Lat: {} Long: {} Start_{noun}(m): {} End_{noun}(m): {} Vert_spacing(m): {}",
            query.text("lat1")?,
            query.text("lon1")?,
            query.text(mode.start_key())?,
            query.text(mode.end_key())?,
            query.text("vertical_spacing")?,
            noun = mode.noun(),
        ))
        .line(format!(
            "{}  Vp(km/s)  Vs(km/s)  Density(kg/m^3)",
            mode.column_label()
        ));
    Ok(header)
}
