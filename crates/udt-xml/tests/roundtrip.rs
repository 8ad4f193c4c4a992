//! Property tests for codec round-trip stability.

use proptest::prelude::*;
use udt_model::{
    AssociationLabels, ClassModel, Connector, ModelId, ModelLink, ShapeId, ShapeRect, UmlClass,
    UmlDimensions, UmlDocument, UmlDocumentKind, UmlLink, UmlPosition, UmlProject,
    line_end_points,
};
use udt_xml::{deserialize_project, serialize_project};

#[derive(Debug, Clone)]
struct ClassSpot {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

fn class_spot() -> impl Strategy<Value = ClassSpot> {
    (0..5000i32, 0..5000i32, 20..500i32, 20..500i32).prop_map(|(x, y, width, height)| ClassSpot {
        x,
        y,
        width,
        height,
    })
}

fn project_from_spots(spots: &[ClassSpot]) -> UmlProject {
    let mut document = UmlDocument::new(UmlDocumentKind::Class, "Generated");
    document.scroll_position_x = 0;
    document.scroll_position_y = 0;

    for (index, spot) in spots.iter().enumerate() {
        let shape_id = ShapeId::new((index + 1).to_string());
        let model = ClassModel::new(ModelId::new(index as u32 + 1), format!("Class{index}"));
        let mut class = UmlClass::new(shape_id, model);
        class.position = UmlPosition::new(spot.x, spot.y);
        class.size = UmlDimensions::new(spot.width, spot.height);
        document.classes.push(class);
    }

    // Chain each shape to the next one.
    for index in 1..spots.len() {
        let connector = Connector::new(
            ShapeId::new(format!("link-{index}")),
            ModelLink {
                source_id: ShapeId::new(index.to_string()),
                destination_id: ShapeId::new((index + 1).to_string()),
                ..ModelLink::default()
            },
        );
        document.links.push(UmlLink::Association {
            connector,
            labels: AssociationLabels::default(),
        });
    }

    let mut project = UmlProject::new();
    project.documents.insert(document);
    project
}

proptest! {
    /// Saving, loading, and saving again reproduces the file exactly.
    #[test]
    fn reserialization_is_byte_stable(spots in prop::collection::vec(class_spot(), 1..6)) {
        let project = project_from_spots(&spots);

        let first = serialize_project(&project).unwrap();
        let reloaded = deserialize_project(&first).unwrap();
        let second = serialize_project(&reloaded).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Swapping a connector's ends and reversing its interior points
    /// mirrors the computed end points exactly.
    #[test]
    fn reversing_a_connector_swaps_its_end_points(
        a in class_spot(),
        b in class_spot(),
        interior in prop::collection::vec((0..5000i32, 0..5000i32), 0..4),
    ) {
        let source = ShapeRect::new(UmlPosition::new(a.x, a.y), UmlDimensions::new(a.width, a.height));
        let destination = ShapeRect::new(UmlPosition::new(b.x, b.y), UmlDimensions::new(b.width, b.height));
        let interior: Vec<UmlPosition> =
            interior.into_iter().map(|(x, y)| UmlPosition::new(x, y)).collect();
        let reversed: Vec<UmlPosition> = interior.iter().rev().copied().collect();

        let forward = line_end_points(source, destination, &interior);
        let backward = line_end_points(destination, source, &reversed);

        prop_assert_eq!(forward.from_position, backward.to_position);
        prop_assert_eq!(forward.to_position, backward.from_position);
    }

    #[test]
    fn loading_preserves_shape_and_link_counts(spots in prop::collection::vec(class_spot(), 1..6)) {
        let project = project_from_spots(&spots);

        let xml = serialize_project(&project).unwrap();
        let reloaded = deserialize_project(&xml).unwrap();

        let document = reloaded.documents.get("Generated").unwrap();
        prop_assert_eq!(document.classes.len(), spots.len());
        prop_assert_eq!(document.links.len(), spots.len() - 1);
        for (index, spot) in spots.iter().enumerate() {
            prop_assert_eq!(document.classes[index].position, UmlPosition::new(spot.x, spot.y));
            prop_assert_eq!(
                document.classes[index].size,
                UmlDimensions::new(spot.width, spot.height)
            );
        }
    }
}
