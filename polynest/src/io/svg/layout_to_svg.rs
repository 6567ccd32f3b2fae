use svg::Document;
use svg::node::element::{Group, Title};

use crate::entities::{Layout, PackGroup};
use crate::geometry::geo_traits::Shape;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

/// Renders a single layout: the bin outline with every placed item on top.
pub fn layout_to_svg(layout: &Layout, options: SvgDrawOptions, title: &str) -> Document {
    let bin = &layout.bin;
    let bbox = bin.bbox();
    let theme = &options.theme;

    //leave a margin around the bin
    let margin = 0.05 * f64::min(bbox.width() as f64, bbox.height() as f64);
    let vbox = (
        bbox.x_min as f64 - margin,
        bbox.y_min as f64 - margin,
        bbox.width() as f64 + 2.0 * margin,
        bbox.height() as f64 + 2.0 * margin,
    );

    let stroke_width =
        f64::min(bbox.width() as f64, bbox.height() as f64) * 0.001 * theme.stroke_width_multiplier;

    let bin_group = Group::new()
        .set("id", "bin")
        .add(svg_util::data_to_path(
            svg_util::simple_polygon_data(&bin.outer),
            &[
                ("fill", &*format!("{}", theme.bin_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "bin, bbox: [x_min: {}, y_min: {}, x_max: {}, y_max: {}] | density: {:.3}% | {}",
            bbox.x_min,
            bbox.y_min,
            bbox.x_max,
            bbox.y_max,
            layout.density() * 100.0,
            title,
        )));

    let mut items_group = Group::new().set("id", "items");
    for pi in &layout.placed_items {
        let item_path = svg_util::data_to_path(
            svg_util::simple_polygon_data(&pi.shape),
            &[
                ("fill", &*format!("{}", theme.item_fill)),
                ("fill-opacity", "0.5"),
                ("fill-rule", "nonzero"),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", stroke_width)),
            ],
        )
        .add(Title::new(format!(
            "item, id: {}, transf: [{}], area: {:.3}",
            pi.item_id,
            pi.d_transf,
            pi.shape.area(),
        )));
        items_group = items_group.add(item_path);
    }

    //svg y-axis points down, flip the drawing to match the bin's frame
    let flip = format!(
        "translate(0 {}) scale(1 -1)",
        (bbox.y_min + bbox.y_max) as f64
    );
    let content = Group::new()
        .set("transform", flip)
        .add(bin_group)
        .add(items_group);

    Document::new().set("viewBox", vbox).add(content)
}

/// Renders every layout of a pack group, one document per bin.
pub fn pack_group_to_svg(pack_group: &PackGroup, options: SvgDrawOptions) -> Vec<Document> {
    pack_group
        .layouts
        .iter()
        .enumerate()
        .map(|(i, layout)| layout_to_svg(layout, options, &format!("bin {i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bin, Item};
    use crate::geometry::primitives::SPolygon;
    use crate::nester::{DecreasingSize, Nester, NesterConfig};
    use crate::placer::{BLPlacerConfig, BottomLeftPlacer};

    #[test]
    fn svg_contains_every_item() {
        let bin = Bin::new_rectangle(100, 100).unwrap();
        let placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());
        let nester = Nester::new(placer, DecreasingSize, NesterConfig::default());
        let items = vec![
            Item::new(0, SPolygon::rectangle(30, 30).unwrap()),
            Item::new(1, SPolygon::rectangle(20, 10).unwrap()),
        ];
        let pg = nester.nest(&items).unwrap();

        let docs = pack_group_to_svg(&pg, SvgDrawOptions::default());
        assert_eq!(docs.len(), pg.layouts.len());
        let rendered = docs[0].to_string();
        assert!(rendered.contains("item, id: 0"));
        assert!(rendered.contains("item, id: 1"));
    }
}
