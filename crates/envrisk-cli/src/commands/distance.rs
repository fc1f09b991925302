//! Distance command implementation

use crate::cli::DistanceArgs;
use crate::output::OutputWriter;
use crate::output_types::DistanceOutput;
use anyhow::{Context, Result};
use envrisk_core::models::GeoPoint;
use envrisk_core::rounding::round_to;
use envrisk_geo::haversine_km;

pub fn execute(args: DistanceArgs, output: &OutputWriter) -> Result<()> {
    let from = GeoPoint::new(args.lat1, args.lon1).context("Invalid first point")?;
    let to = GeoPoint::new(args.lat2, args.lon2).context("Invalid second point")?;
    let distance_km = round_to(haversine_km(from, to), 2);

    if output.is_json() {
        output.result(DistanceOutput { from, to, distance_km })?;
    } else {
        output.kv("From", format!("{}, {}", from.latitude, from.longitude));
        output.kv("To", format!("{}, {}", to.latitude, to.longitude));
        output.kv("Distance", format!("{:.2} km", distance_km));
    }

    Ok(())
}
