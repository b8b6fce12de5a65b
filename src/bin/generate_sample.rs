use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

#[derive(Serialize)]
struct SalesRow<'a> {
    #[serde(rename = "Produto")]
    product: &'a str,
    #[serde(rename = "Ano-Mês")]
    year_month: String,
    #[serde(rename = "Filial")]
    branch: &'a str,
    #[serde(rename = "Quantidade de Vendas")]
    quantity: u32,
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    // (name, base monthly volume, growth per month, seasonal amplitude)
    let products = [
        ("Widget", 120.0, 1.5, 25.0),
        ("Gadget", 60.0, -0.4, 10.0),
        ("Gizmo", 30.0, 0.8, 4.0),
    ];
    let branches = [("North", 1.0), ("South", 0.7), ("East", 1.3)];
    let months = 30;

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut rows = 0;
    for &(product, base, growth, amplitude) in &products {
        for &(branch, weight) in &branches {
            for i in 0..months {
                let year = 2022 + i / 12;
                let month = i % 12 + 1;
                let season = amplitude * (2.0 * std::f64::consts::PI * (month as f64 - 3.0) / 12.0).sin();
                let level = weight * (base + growth * i as f64 + season);
                let noise = Normal::new(0.0, 0.05 * level.abs()).expect("valid noise scale");
                let quantity = (level + noise.sample(&mut rng)).round().max(0.0) as u32;

                writer
                    .serialize(SalesRow {
                        product,
                        year_month: format!("{year}-{month:02}"),
                        branch,
                        quantity,
                    })
                    .expect("Failed to write row");
                rows += 1;
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {rows} rows ({} products × {} branches × {months} months) to {output_path}",
        products.len(),
        branches.len()
    );
}
