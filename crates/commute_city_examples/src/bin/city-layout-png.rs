use commute_city::prelude::*;
use commute_city_examples::{init_tracing, render_city_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Collects the terrain texture handed over by the generator.
#[derive(Default)]
struct TextureHost {
    texture: Option<PixelBuffer>,
    baked: bool,
}

impl CityHost for TextureHost {
    fn apply_terrain_texture(&mut self, pixels: &PixelBuffer) {
        self.texture = Some(pixels.clone());
    }

    fn bake_navigation(&mut self) {
        self.baked = true;
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let generator = CityGenerator::try_new(CityConfig::default())?;
    let mut rng = StdRng::seed_from_u64(42);
    let mut host = TextureHost::default();
    let city = generator.generate_with(&mut rng, &mut host, &mut ())?;

    if let Some(texture) = &host.texture {
        commute_city_examples::pixels_to_image(texture)?.save("city-layout-heightmap.png")?;
    }
    anyhow::ensure!(host.baked, "navigation was never baked");

    render_city_to_png(&city, &RenderConfig::default(), "city-layout.png")?;
    Ok(())
}
