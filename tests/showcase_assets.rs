use std::path::Path;

use factory_qc::preview;
use factory_qc::showcase;

#[test]
fn bundled_showcase_images_decode() {
    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    for asset in showcase::asset_paths() {
        let preview = preview::load_preview(&assets.join(asset))
            .unwrap_or_else(|err| panic!("{asset}: {err}"));
        assert_eq!(preview.mime, "image/png");
        assert!(preview.source_size[0] > 0 && preview.source_size[1] > 0);
    }
}
