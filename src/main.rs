use std::error::Error;

use log::info;
use young_iso::{
    find_iso, generate_partitions, young_group, GeneratedGroup, IsoMethod, IsoSearchError,
    PermutationGroup, YoungGroupConfig, YoungTableau,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    for p in generate_partitions(4) {
        let yt = YoungTableau::from(p);
        let rows_only = young_group(&yt, YoungGroupConfig::rows_only())?;
        let fused = young_group(&yt, YoungGroupConfig::fused_rows())?;
        let full = young_group(&yt, YoungGroupConfig::default())?;
        println!(
            "{} rows {:?} columns {:?} orders {} {} {}",
            yt,
            yt.rows(),
            yt.columns(),
            rows_only.order(),
            fused.order(),
            full.order()
        );
    }

    let yt = YoungTableau::from_notation("2 + 2", false)?;
    let fused = young_group(&yt, YoungGroupConfig::fused_rows())?;
    let d4 = GeneratedGroup::dihedral(4);
    match find_iso(&fused, &d4, IsoMethod::ElementOrders) {
        Ok(Some(iso)) => {
            println!("{} with fused rows is isomorphic to D4", yt);
            for (x, y) in iso.iter() {
                println!("  {} -> {}", x, y);
            }
        }
        Ok(None) => println!("{} with fused rows is not isomorphic to D4", yt),
        Err(IsoSearchError::Impossible) => {
            info!("Invariants already rule out {} against D4", yt);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
