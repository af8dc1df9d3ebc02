use commute_city::prelude::*;
use commute_city_examples::{init_tracing, render_city_to_png, Overlay, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CityConfig::new(600, 600)
        .with_site_count(60)
        .with_building_count(0)
        .with_agent_count(0);
    let generator = CityGenerator::try_new(config)?;
    let city = generator.generate(&mut StdRng::seed_from_u64(7))?;

    // One image per graph so the three edge sets can be compared side by side.
    let variants = [
        (Overlay::Voronoi, [230, 60, 40, 255], "graph-overlays-voronoi.png"),
        (Overlay::Delaunay, [40, 200, 90, 255], "graph-overlays-delaunay.png"),
        (Overlay::SpanningTree, [40, 120, 240, 255], "graph-overlays-mst.png"),
    ];
    for (overlay, color, path) in variants {
        let rc = RenderConfig::new()
            .with_layer(overlay, color)
            .with_layer(Overlay::Sites, [255, 255, 255, 255]);
        render_city_to_png(&city, &rc, path)?;
    }

    println!(
        "spanning tree: {} edges, total length {:.1}",
        city.graph.spanning_tree.len(),
        commute_city::graph::total_length(&city.graph.spanning_tree)
    );
    Ok(())
}
