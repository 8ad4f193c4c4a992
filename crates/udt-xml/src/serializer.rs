//! Serializer: document model graph to hierarchical XML text.
//!
//! Element and attribute ordering is fixed so serializing an unchanged
//! graph twice produces byte-identical output. Shapes are emitted
//! before links; the deserializer resolves link references against
//! already-seen shapes, so this order is load-bearing.

use std::collections::HashMap;

use udt_model::{
    AssociationLabel, ClassModel, Connector, ShapeId, ShapeRect, UmlDimensions, UmlDocument,
    UmlLink, UmlLollipopInterface, UmlPosition, UmlProject, line_end_points,
};

use crate::element::XmlElement;
use crate::error::{Result, XmlError};
use crate::vocabulary::{SchemaVersion, Vocabulary, names};

/// Serialize a whole project with the current schema vocabulary.
///
/// Link endpoints are recomputed from the connected shapes' current
/// geometry; a cached endpoint that went stale during editing is never
/// trusted.
///
/// # Errors
///
/// Fails only on caller misuse: a link or lollipop referencing a shape
/// id absent from its document.
pub fn serialize_project(project: &UmlProject) -> Result<String> {
    Ok(project_to_element(project)?.to_document_string())
}

/// Build the element tree for a project without rendering it.
pub fn project_to_element(project: &UmlProject) -> Result<XmlElement> {
    let vocabulary = SchemaVersion::CURRENT.vocabulary();

    let mut root = XmlElement::new(names::PROJECT);
    root.set_attribute(names::ATTR_FILE_NAME, project.file_name.display().to_string());
    root.set_attribute(names::ATTR_VERSION, SchemaVersion::CURRENT.token());
    root.set_attribute(names::ATTR_CODE_PATH, project.code_path.display().to_string());

    for document in &project.documents {
        root.push_child(document_to_element(document, vocabulary)?);
    }
    Ok(root)
}

fn document_to_element(document: &UmlDocument, vocabulary: &Vocabulary) -> Result<XmlElement> {
    let mut diagram = XmlElement::new(names::DIAGRAM);
    diagram.set_attribute(names::ATTR_DOCUMENT_TYPE, document.kind.label());
    diagram.set_attribute(names::ATTR_TITLE, document.title.as_str());
    diagram.set_attribute(
        names::ATTR_SCROLL_POSITION_X,
        document.scroll_position_x.to_string(),
    );
    diagram.set_attribute(
        names::ATTR_SCROLL_POSITION_Y,
        document.scroll_position_y.to_string(),
    );
    diagram.set_attribute(
        names::ATTR_PIXELS_PER_UNIT_X,
        document.pixels_per_unit_x.to_string(),
    );
    diagram.set_attribute(
        names::ATTR_PIXELS_PER_UNIT_Y,
        document.pixels_per_unit_y.to_string(),
    );

    // Fixed emission order: shapes first, then links, then lollipops.
    for class in &document.classes {
        let mut element = shape_element(names::UML_CLASS, &class.id, class.position, class.size);
        element.push_child(class_model_element(&class.model, vocabulary));
        diagram.push_child(element);
    }
    for note in &document.notes {
        let mut element = shape_element(names::UML_NOTE, &note.id, note.position, note.size);
        let mut model = XmlElement::new(vocabulary.model_note);
        model.set_attribute(names::ATTR_ID, note.model.id.to_string());
        model.set_attribute(names::ATTR_CONTENT, note.model.content.as_str());
        model.set_attribute(names::ATTR_FILE_NAME, note.model.file_name.as_str());
        element.push_child(model);
        diagram.push_child(element);
    }
    for text in &document.texts {
        let mut element = shape_element(names::UML_TEXT, &text.id, text.position, text.size);
        let mut model = XmlElement::new(vocabulary.model_text);
        model.set_attribute(names::ATTR_ID, text.model.id.to_string());
        model.set_attribute(names::ATTR_CONTENT, text.model.content.as_str());
        element.push_child(model);
        diagram.push_child(element);
    }
    for actor in &document.actors {
        let mut element = shape_element(names::UML_ACTOR, &actor.id, actor.position, actor.size);
        let mut model = XmlElement::new(vocabulary.model_actor);
        model.set_attribute(names::ATTR_ID, actor.model.id.to_string());
        model.set_attribute(names::ATTR_NAME, actor.model.name.as_str());
        model.set_attribute(names::ATTR_FILE_NAME, actor.model.file_name.as_str());
        element.push_child(model);
        diagram.push_child(element);
    }
    for use_case in &document.use_cases {
        let mut element =
            shape_element(names::UML_USE_CASE, &use_case.id, use_case.position, use_case.size);
        let mut model = XmlElement::new(vocabulary.model_use_case);
        model.set_attribute(names::ATTR_ID, use_case.model.id.to_string());
        model.set_attribute(names::ATTR_NAME, use_case.model.name.as_str());
        model.set_attribute(names::ATTR_FILE_NAME, use_case.model.file_name.as_str());
        element.push_child(model);
        diagram.push_child(element);
    }

    let rects = shape_rect_index(document);
    for link in &document.links {
        diagram.push_child(link_to_element(link, &rects, vocabulary)?);
    }
    for lollipop in &document.lollipop_interfaces {
        diagram.push_child(lollipop_to_element(lollipop, &rects, vocabulary)?);
    }

    Ok(diagram)
}

fn shape_element(
    name: &str,
    id: &ShapeId,
    position: UmlPosition,
    size: UmlDimensions,
) -> XmlElement {
    let mut element = XmlElement::new(name);
    element.set_attribute(names::ATTR_ID, id.as_str());
    element.set_attribute(names::ATTR_WIDTH, size.width.to_string());
    element.set_attribute(names::ATTR_HEIGHT, size.height.to_string());
    element.set_attribute(names::ATTR_X, position.x.to_string());
    element.set_attribute(names::ATTR_Y, position.y.to_string());
    element
}

fn class_model_element(model: &ClassModel, vocabulary: &Vocabulary) -> XmlElement {
    let mut element = XmlElement::new(vocabulary.model_class);
    element.set_attribute(names::ATTR_ID, model.id.to_string());
    element.set_attribute(names::ATTR_NAME, model.name.as_str());
    element.set_attribute(names::ATTR_DISPLAY_METHODS, bool_token(model.display_methods));
    element.set_attribute(names::ATTR_DISPLAY_PARAMETERS, model.display_parameters.label());
    element.set_attribute(names::ATTR_DISPLAY_CONSTRUCTOR, model.display_constructor.label());
    element.set_attribute(
        names::ATTR_DISPLAY_DUNDER_METHODS,
        model.display_dunder_methods.label(),
    );
    element.set_attribute(names::ATTR_DISPLAY_FIELDS, bool_token(model.display_fields));
    element.set_attribute(names::ATTR_DISPLAY_STEREOTYPE, bool_token(model.display_stereotype));
    element.set_attribute(names::ATTR_FILE_NAME, model.file_name.as_str());
    element.set_attribute(names::ATTR_DESCRIPTION, model.description.as_str());

    for field in &model.fields {
        let mut field_element = XmlElement::new(vocabulary.model_field);
        field_element.set_attribute(names::ATTR_NAME, field.name.as_str());
        field_element.set_attribute(names::ATTR_VISIBILITY, field.visibility.label());
        field_element.set_attribute(names::ATTR_TYPE, field.field_type.as_str());
        field_element.set_attribute(names::ATTR_DEFAULT_VALUE, field.default_value.as_str());
        element.push_child(field_element);
    }
    for method in &model.methods {
        let mut method_element = XmlElement::new(vocabulary.model_method);
        method_element.set_attribute(names::ATTR_NAME, method.name.as_str());
        method_element.set_attribute(names::ATTR_VISIBILITY, method.visibility.label());
        method_element.set_attribute(names::ATTR_RETURN_TYPE, method.return_type.as_str());
        for parameter in &method.parameters {
            let mut parameter_element = XmlElement::new(vocabulary.model_parameter);
            parameter_element.set_attribute(names::ATTR_NAME, parameter.name.as_str());
            parameter_element.set_attribute(names::ATTR_TYPE, parameter.parameter_type.as_str());
            parameter_element
                .set_attribute(names::ATTR_DEFAULT_VALUE, parameter.default_value.as_str());
            method_element.push_child(parameter_element);
        }
        element.push_child(method_element);
    }
    element
}

fn link_to_element(
    link: &UmlLink,
    rects: &HashMap<String, ShapeRect>,
    vocabulary: &Vocabulary,
) -> Result<XmlElement> {
    let connector = link.connector();
    let source = resolve_rect(rects, connector, connector.model.source_id.as_str())?;
    let destination = resolve_rect(rects, connector, connector.model.destination_id.as_str())?;
    let end_points =
        line_end_points(source, destination, &connector.control_points);

    let mut element = XmlElement::new(names::UML_LINK);
    element.set_attribute(names::ATTR_ID, connector.id.as_str());
    element.set_attribute(names::ATTR_FROM_X, end_points.from_position.x.to_string());
    element.set_attribute(names::ATTR_FROM_Y, end_points.from_position.y.to_string());
    element.set_attribute(names::ATTR_TO_X, end_points.to_position.x.to_string());
    element.set_attribute(names::ATTR_TO_Y, end_points.to_position.y.to_string());
    element.set_attribute(names::ATTR_SPLINE, bool_token(connector.spline));

    if let UmlLink::Association { labels, .. } = link {
        element.push_child(label_element(names::ASSOCIATION_NAME, labels.name));
        element.push_child(label_element(names::SOURCE_CARDINALITY, labels.source_cardinality));
        element.push_child(label_element(
            names::DESTINATION_CARDINALITY,
            labels.destination_cardinality,
        ));
    }

    // Interior points only; the two endpoints are derived geometry.
    for point in &connector.control_points {
        let mut control_point = XmlElement::new(names::LINE_CONTROL_POINT);
        control_point.set_attribute(names::ATTR_X, point.x.to_string());
        control_point.set_attribute(names::ATTR_Y, point.y.to_string());
        element.push_child(control_point);
    }

    let mut model = XmlElement::new(vocabulary.model_link);
    model.set_attribute(names::ATTR_NAME, connector.model.name.as_str());
    model.set_attribute(names::ATTR_TYPE, link.type_label());
    model.set_attribute(names::ATTR_SOURCE_ID, connector.model.source_id.as_str());
    model.set_attribute(names::ATTR_DESTINATION_ID, connector.model.destination_id.as_str());
    model.set_attribute(names::ATTR_BIDIRECTIONAL, bool_token(connector.model.bidirectional));
    model.set_attribute(
        names::ATTR_SOURCE_CARDINALITY_VALUE,
        connector.model.source_cardinality.as_str(),
    );
    model.set_attribute(
        names::ATTR_DESTINATION_CARDINALITY_VALUE,
        connector.model.destination_cardinality.as_str(),
    );
    element.push_child(model);

    Ok(element)
}

fn lollipop_to_element(
    lollipop: &UmlLollipopInterface,
    rects: &HashMap<String, ShapeRect>,
    vocabulary: &Vocabulary,
) -> Result<XmlElement> {
    if !rects.contains_key(lollipop.attached_to.as_str()) {
        return Err(XmlError::UnattachedLollipop {
            interface: lollipop.interface.name.clone(),
            missing: lollipop.attached_to.as_str().to_string(),
        });
    }

    let mut element = XmlElement::new(names::UML_LOLLIPOP_INTERFACE);
    // Debug formatting keeps the decimal point at integral values, so
    // a centum of 1.0 stays "1.0" on the wire rather than "1".
    element.set_attribute(names::ATTR_LINE_CENTUM, format!("{:?}", lollipop.line_centum));
    element.set_attribute(names::ATTR_ATTACHMENT_SIDE, lollipop.attachment_side.label());
    element.set_attribute(names::ATTR_ATTACHED_TO_ID, lollipop.attached_to.as_str());

    let mut interface = XmlElement::new(vocabulary.model_interface);
    interface.set_attribute(names::ATTR_ID, lollipop.interface.id.to_string());
    interface.set_attribute(names::ATTR_NAME, lollipop.interface.name.as_str());
    interface.set_attribute(names::ATTR_DESCRIPTION, lollipop.interface.description.as_str());
    for implementor in &lollipop.interface.implementors {
        let mut implementor_element = XmlElement::new(names::IMPLEMENTOR);
        implementor_element.set_attribute(names::ATTR_IMPLEMENTING_CLASS_NAME, implementor.as_str());
        interface.push_child(implementor_element);
    }
    element.push_child(interface);

    Ok(element)
}

fn label_element(name: &str, label: AssociationLabel) -> XmlElement {
    let mut element = XmlElement::new(name);
    element.set_attribute(names::ATTR_DELTA_X, label.delta.delta_x.to_string());
    element.set_attribute(names::ATTR_DELTA_Y, label.delta.delta_y.to_string());
    element
}

/// Booleans use the historical capitalized tokens.
const fn bool_token(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn shape_rect_index(document: &UmlDocument) -> HashMap<String, ShapeRect> {
    let mut rects = HashMap::new();
    for class in &document.classes {
        rects.insert(class.id.as_str().to_string(), class.rect());
    }
    for note in &document.notes {
        rects.insert(note.id.as_str().to_string(), note.rect());
    }
    for text in &document.texts {
        rects.insert(text.id.as_str().to_string(), text.rect());
    }
    for actor in &document.actors {
        rects.insert(actor.id.as_str().to_string(), actor.rect());
    }
    for use_case in &document.use_cases {
        rects.insert(use_case.id.as_str().to_string(), use_case.rect());
    }
    rects
}

fn resolve_rect(
    rects: &HashMap<String, ShapeRect>,
    connector: &Connector,
    shape_id: &str,
) -> Result<ShapeRect> {
    rects
        .get(shape_id)
        .copied()
        .ok_or_else(|| XmlError::UnresolvedReference {
            link_id: connector.id.as_str().to_string(),
            missing: shape_id.to_string(),
        })
}
