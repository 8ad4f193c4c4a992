//! Deserializer: hierarchical XML text back to the document model.
//!
//! Shapes are read before links so that link references can be resolved
//! against an id index of already-seen shapes; an unresolvable
//! reference aborts the whole project rather than yielding a link with
//! a placeholder endpoint. Stored endpoint geometry is authoritative on
//! load; nothing is recomputed until the owning application re-lays the
//! diagram out.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::warn;
use udt_model::{
    ActorModel, AssociationLabel, AssociationLabels, AttachmentSide, ClassModel, Connector,
    DeltaXy, DisplayTriState, EndPoints, Field, Method, ModelId, ModelInterface, ModelLink,
    NoteModel, Parameter, ShapeId, TextModel, UmlActor, UmlClass, UmlDimensions, UmlDocument,
    UmlDocumentKind, UmlLink, UmlLollipopInterface, UmlNote, UmlPosition, UmlProject, UmlText,
    UmlUseCase, UseCaseModel, Visibility,
};

use crate::element::XmlElement;
use crate::error::{Result, XmlError};
use crate::vocabulary::{SchemaVersion, Vocabulary, names};

/// What to do when two documents declare the same title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateTitles {
    /// Keep the later document, in the earlier one's position.
    #[default]
    LastWins,
    /// Fail the whole project.
    Reject,
}

/// Deserialization options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeserializeOptions {
    pub duplicate_titles: DuplicateTitles,
}

/// Deserialize a project document with default options.
pub fn deserialize_project(xml: &str) -> Result<UmlProject> {
    deserialize_project_with(xml, DeserializeOptions::default())
}

/// Deserialize a project document.
///
/// The vocabulary is selected by the root's declared `version`
/// attribute; the caller never specifies one.
pub fn deserialize_project_with(xml: &str, options: DeserializeOptions) -> Result<UmlProject> {
    let root = XmlElement::parse(xml)?;
    if root.name() != names::PROJECT {
        return Err(XmlError::UnexpectedRoot {
            found: root.name().to_string(),
        });
    }

    let version_token = require_attribute(&root, names::ATTR_VERSION)?;
    let version = SchemaVersion::from_token(version_token)?;
    let vocabulary = version.vocabulary();

    let mut project = UmlProject {
        file_name: PathBuf::from(require_attribute(&root, names::ATTR_FILE_NAME)?),
        schema_version: version_token.to_string(),
        code_path: PathBuf::from(require_attribute(&root, names::ATTR_CODE_PATH)?),
        ..UmlProject::new()
    };

    for diagram in root.children_named(names::DIAGRAM) {
        let title = require_attribute(diagram, names::ATTR_TITLE)?;
        let type_value = require_attribute(diagram, names::ATTR_DOCUMENT_TYPE)?;
        let Some(kind) = UmlDocumentKind::from_label(type_value) else {
            // Unknown document type has document-scale blast radius:
            // skip it, keep the rest of the project.
            warn!(title, document_type = type_value, "skipping document with unknown type");
            continue;
        };

        let document = deserialize_document(diagram, kind, title, vocabulary)?;

        if project.documents.contains_title(&document.title) {
            match options.duplicate_titles {
                DuplicateTitles::LastWins => {
                    warn!(title = document.title.as_str(), "duplicate document title, keeping the later one");
                }
                DuplicateTitles::Reject => {
                    return Err(XmlError::DuplicateTitle {
                        title: document.title,
                    });
                }
            }
        }
        project.documents.insert(document);
    }

    Ok(project)
}

fn deserialize_document(
    diagram: &XmlElement,
    kind: UmlDocumentKind,
    title: &str,
    vocabulary: &Vocabulary,
) -> Result<UmlDocument> {
    let mut document = UmlDocument::new(kind, title);
    document.scroll_position_x = int_attribute(diagram, names::ATTR_SCROLL_POSITION_X)?;
    document.scroll_position_y = int_attribute(diagram, names::ATTR_SCROLL_POSITION_Y)?;
    document.pixels_per_unit_x = int_attribute(diagram, names::ATTR_PIXELS_PER_UNIT_X)?;
    document.pixels_per_unit_y = int_attribute(diagram, names::ATTR_PIXELS_PER_UNIT_Y)?;

    // Closed switch: each document kind owns a fixed set of shape
    // families. Shapes register in the id index before any link reads.
    let mut index: HashSet<String> = HashSet::new();
    match kind {
        UmlDocumentKind::Class => {
            reject_foreign_elements(diagram, CLASS_DOCUMENT_ELEMENTS, title)?;
            document.classes = deserialize_classes(diagram, vocabulary, title, &mut index)?;
            document.notes = deserialize_notes(diagram, vocabulary, title, &mut index)?;
            document.texts = deserialize_texts(diagram, vocabulary, title, &mut index)?;
            document.links = deserialize_links(diagram, vocabulary, &index)?;
            document.lollipop_interfaces = deserialize_lollipops(diagram, vocabulary, &index)?;
        }
        UmlDocumentKind::UseCase => {
            reject_foreign_elements(diagram, USE_CASE_DOCUMENT_ELEMENTS, title)?;
            document.notes = deserialize_notes(diagram, vocabulary, title, &mut index)?;
            document.actors = deserialize_actors(diagram, vocabulary, title, &mut index)?;
            document.use_cases = deserialize_use_cases(diagram, vocabulary, title, &mut index)?;
            document.links = deserialize_links(diagram, vocabulary, &index)?;
        }
        // These kinds carry no persisted shapes. Any child would be
        // dropped on re-save, so refuse rather than lose it.
        UmlDocumentKind::Sequence | UmlDocumentKind::NotSet => {
            reject_foreign_elements(diagram, &[], title)?;
        }
    }

    Ok(document)
}

const CLASS_DOCUMENT_ELEMENTS: &[&str] = &[
    names::UML_CLASS,
    names::UML_NOTE,
    names::UML_TEXT,
    names::UML_LINK,
    names::UML_LOLLIPOP_INTERFACE,
];
const USE_CASE_DOCUMENT_ELEMENTS: &[&str] =
    &[names::UML_NOTE, names::UML_ACTOR, names::UML_USE_CASE, names::UML_LINK];

/// Every diagram child must come from the kind's closed element set.
fn reject_foreign_elements(
    diagram: &XmlElement,
    allowed: &[&str],
    title: &str,
) -> Result<()> {
    for child in diagram.children() {
        if !allowed.contains(&child.name()) {
            return Err(XmlError::UnknownShapeType {
                element: child.name().to_string(),
                title: title.to_string(),
            });
        }
    }
    Ok(())
}

/// Shared geometry of a shape element: id, size, position.
struct GraphicInformation {
    id: ShapeId,
    position: UmlPosition,
    size: UmlDimensions,
}

impl GraphicInformation {
    fn from_element(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            id: ShapeId::new(require_attribute(element, names::ATTR_ID)?),
            position: UmlPosition::new(
                int_attribute(element, names::ATTR_X)?,
                int_attribute(element, names::ATTR_Y)?,
            ),
            size: UmlDimensions::new(
                int_attribute(element, names::ATTR_WIDTH)?,
                int_attribute(element, names::ATTR_HEIGHT)?,
            ),
        })
    }
}

fn register(index: &mut HashSet<String>, id: &ShapeId, title: &str) -> Result<()> {
    if !index.insert(id.as_str().to_string()) {
        return Err(XmlError::DuplicateShapeId {
            id: id.as_str().to_string(),
            title: title.to_string(),
        });
    }
    Ok(())
}

fn deserialize_classes(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    title: &str,
    index: &mut HashSet<String>,
) -> Result<Vec<UmlClass>> {
    let mut classes = Vec::new();
    for element in diagram.children_named(names::UML_CLASS) {
        let graphic = GraphicInformation::from_element(element)?;
        let model_element = single_model_element(element, vocabulary.model_class, &graphic.id)?;
        let model = class_model_from_element(model_element, vocabulary)?;
        register(index, &graphic.id, title)?;
        classes.push(UmlClass {
            id: graphic.id,
            position: graphic.position,
            size: graphic.size,
            model,
        });
    }
    Ok(classes)
}

fn deserialize_notes(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    title: &str,
    index: &mut HashSet<String>,
) -> Result<Vec<UmlNote>> {
    let mut notes = Vec::new();
    for element in diagram.children_named(names::UML_NOTE) {
        let graphic = GraphicInformation::from_element(element)?;
        let model_element = single_model_element(element, vocabulary.model_note, &graphic.id)?;
        let model = NoteModel {
            id: model_id_attribute(model_element)?,
            content: require_attribute(model_element, names::ATTR_CONTENT)?.to_string(),
            file_name: optional_attribute(model_element, names::ATTR_FILE_NAME),
        };
        register(index, &graphic.id, title)?;
        notes.push(UmlNote {
            id: graphic.id,
            position: graphic.position,
            size: graphic.size,
            model,
        });
    }
    Ok(notes)
}

fn deserialize_texts(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    title: &str,
    index: &mut HashSet<String>,
) -> Result<Vec<UmlText>> {
    let mut texts = Vec::new();
    for element in diagram.children_named(names::UML_TEXT) {
        let graphic = GraphicInformation::from_element(element)?;
        let model_element = single_model_element(element, vocabulary.model_text, &graphic.id)?;
        let model = TextModel {
            id: model_id_attribute(model_element)?,
            content: require_attribute(model_element, names::ATTR_CONTENT)?.to_string(),
        };
        register(index, &graphic.id, title)?;
        texts.push(UmlText {
            id: graphic.id,
            position: graphic.position,
            size: graphic.size,
            model,
        });
    }
    Ok(texts)
}

fn deserialize_actors(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    title: &str,
    index: &mut HashSet<String>,
) -> Result<Vec<UmlActor>> {
    let mut actors = Vec::new();
    for element in diagram.children_named(names::UML_ACTOR) {
        let graphic = GraphicInformation::from_element(element)?;
        let model_element = single_model_element(element, vocabulary.model_actor, &graphic.id)?;
        let model = ActorModel {
            id: model_id_attribute(model_element)?,
            name: require_attribute(model_element, names::ATTR_NAME)?.to_string(),
            file_name: optional_attribute(model_element, names::ATTR_FILE_NAME),
        };
        register(index, &graphic.id, title)?;
        actors.push(UmlActor {
            id: graphic.id,
            position: graphic.position,
            size: graphic.size,
            model,
        });
    }
    Ok(actors)
}

fn deserialize_use_cases(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    title: &str,
    index: &mut HashSet<String>,
) -> Result<Vec<UmlUseCase>> {
    let mut use_cases = Vec::new();
    for element in diagram.children_named(names::UML_USE_CASE) {
        let graphic = GraphicInformation::from_element(element)?;
        let model_element = single_model_element(element, vocabulary.model_use_case, &graphic.id)?;
        let model = UseCaseModel {
            id: model_id_attribute(model_element)?,
            name: require_attribute(model_element, names::ATTR_NAME)?.to_string(),
            file_name: optional_attribute(model_element, names::ATTR_FILE_NAME),
        };
        register(index, &graphic.id, title)?;
        use_cases.push(UmlUseCase {
            id: graphic.id,
            position: graphic.position,
            size: graphic.size,
            model,
        });
    }
    Ok(use_cases)
}

fn class_model_from_element(element: &XmlElement, vocabulary: &Vocabulary) -> Result<ClassModel> {
    let mut model = ClassModel {
        id: model_id_attribute(element)?,
        name: require_attribute(element, names::ATTR_NAME)?.to_string(),
        display_methods: bool_attribute(element, names::ATTR_DISPLAY_METHODS)?,
        display_parameters: tri_state_attribute(element, names::ATTR_DISPLAY_PARAMETERS)?,
        display_constructor: tri_state_attribute(element, names::ATTR_DISPLAY_CONSTRUCTOR)?,
        display_dunder_methods: tri_state_attribute(element, names::ATTR_DISPLAY_DUNDER_METHODS)?,
        display_fields: bool_attribute(element, names::ATTR_DISPLAY_FIELDS)?,
        display_stereotype: bool_attribute(element, names::ATTR_DISPLAY_STEREOTYPE)?,
        file_name: optional_attribute(element, names::ATTR_FILE_NAME),
        description: optional_attribute(element, names::ATTR_DESCRIPTION),
        ..ClassModel::default()
    };

    for field_element in element.children_named(vocabulary.model_field) {
        model.fields.push(Field {
            name: require_attribute(field_element, names::ATTR_NAME)?.to_string(),
            visibility: visibility_attribute(field_element)?,
            field_type: optional_attribute(field_element, names::ATTR_TYPE),
            default_value: optional_attribute(field_element, names::ATTR_DEFAULT_VALUE),
        });
    }
    for method_element in element.children_named(vocabulary.model_method) {
        let mut method = Method {
            name: require_attribute(method_element, names::ATTR_NAME)?.to_string(),
            visibility: visibility_attribute(method_element)?,
            return_type: optional_attribute(method_element, names::ATTR_RETURN_TYPE),
            parameters: Vec::new(),
        };
        for parameter_element in method_element.children_named(vocabulary.model_parameter) {
            method.parameters.push(Parameter {
                name: require_attribute(parameter_element, names::ATTR_NAME)?.to_string(),
                parameter_type: optional_attribute(parameter_element, names::ATTR_TYPE),
                default_value: optional_attribute(parameter_element, names::ATTR_DEFAULT_VALUE),
            });
        }
        model.methods.push(method);
    }

    Ok(model)
}

fn deserialize_links(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    index: &HashSet<String>,
) -> Result<Vec<UmlLink>> {
    let mut links = Vec::new();
    for element in diagram.children_named(names::UML_LINK) {
        links.push(link_from_element(element, vocabulary, index)?);
    }
    Ok(links)
}

fn link_from_element(
    element: &XmlElement,
    vocabulary: &Vocabulary,
    index: &HashSet<String>,
) -> Result<UmlLink> {
    let link_id = ShapeId::new(require_attribute(element, names::ATTR_ID)?);

    let model_element = single_model_element(element, vocabulary.model_link, &link_id)?;

    let source_id = ShapeId::new(require_attribute(model_element, names::ATTR_SOURCE_ID)?);
    let destination_id =
        ShapeId::new(require_attribute(model_element, names::ATTR_DESTINATION_ID)?);
    resolve(index, &link_id, &source_id)?;
    resolve(index, &link_id, &destination_id)?;

    let model = ModelLink {
        name: optional_attribute(model_element, names::ATTR_NAME),
        source_id,
        destination_id,
        bidirectional: bool_attribute(model_element, names::ATTR_BIDIRECTIONAL)?,
        source_cardinality: optional_attribute(
            model_element,
            names::ATTR_SOURCE_CARDINALITY_VALUE,
        ),
        destination_cardinality: optional_attribute(
            model_element,
            names::ATTR_DESTINATION_CARDINALITY_VALUE,
        ),
    };

    // Stored geometry is authoritative until the next re-layout.
    let end_points = EndPoints {
        from_position: UmlPosition::new(
            int_attribute(element, names::ATTR_FROM_X)?,
            int_attribute(element, names::ATTR_FROM_Y)?,
        ),
        to_position: UmlPosition::new(
            int_attribute(element, names::ATTR_TO_X)?,
            int_attribute(element, names::ATTR_TO_Y)?,
        ),
    };

    let mut control_points = Vec::new();
    for control_point in element.children_named(names::LINE_CONTROL_POINT) {
        control_points.push(UmlPosition::new(
            int_attribute(control_point, names::ATTR_X)?,
            int_attribute(control_point, names::ATTR_Y)?,
        ));
    }

    let connector = Connector {
        id: link_id.clone(),
        end_points,
        spline: bool_attribute(element, names::ATTR_SPLINE)?,
        control_points,
        model,
    };

    let type_value = require_attribute(model_element, names::ATTR_TYPE)?;
    match type_value {
        "ASSOCIATION" => Ok(UmlLink::Association {
            connector,
            labels: AssociationLabels {
                name: label_from_child(element, names::ASSOCIATION_NAME)?,
                source_cardinality: label_from_child(element, names::SOURCE_CARDINALITY)?,
                destination_cardinality: label_from_child(
                    element,
                    names::DESTINATION_CARDINALITY,
                )?,
            },
        }),
        "INHERITANCE" => Ok(UmlLink::Inheritance(connector)),
        "INTERFACE" => Ok(UmlLink::Interface(connector)),
        "NOTELINK" => Ok(UmlLink::NoteLink(connector)),
        _ => Err(XmlError::UnknownLinkType {
            link_id: link_id.as_str().to_string(),
            value: type_value.to_string(),
        }),
    }
}

fn deserialize_lollipops(
    diagram: &XmlElement,
    vocabulary: &Vocabulary,
    index: &HashSet<String>,
) -> Result<Vec<UmlLollipopInterface>> {
    let mut lollipops = Vec::new();
    for element in diagram.children_named(names::UML_LOLLIPOP_INTERFACE) {
        let attached_to = ShapeId::new(require_attribute(element, names::ATTR_ATTACHED_TO_ID)?);
        let interface_element =
            single_model_element(element, vocabulary.model_interface, &attached_to)?;
        let mut interface = ModelInterface {
            id: model_id_attribute(interface_element)?,
            name: require_attribute(interface_element, names::ATTR_NAME)?.to_string(),
            description: optional_attribute(interface_element, names::ATTR_DESCRIPTION),
            implementors: Vec::new(),
        };
        for implementor in interface_element.children_named(names::IMPLEMENTOR) {
            interface.implementors.push(
                require_attribute(implementor, names::ATTR_IMPLEMENTING_CLASS_NAME)?.to_string(),
            );
        }

        if !index.contains(attached_to.as_str()) {
            return Err(XmlError::UnattachedLollipop {
                interface: interface.name.clone(),
                missing: attached_to.as_str().to_string(),
            });
        }

        lollipops.push(UmlLollipopInterface {
            line_centum: float_attribute(element, names::ATTR_LINE_CENTUM)?,
            attachment_side: attachment_side_attribute(element)?,
            attached_to,
            interface,
        });
    }
    Ok(lollipops)
}

fn label_from_child(element: &XmlElement, name: &str) -> Result<AssociationLabel> {
    match element.children_named(name).next() {
        Some(child) => Ok(AssociationLabel {
            delta: DeltaXy {
                delta_x: int_attribute(child, names::ATTR_DELTA_X)?,
                delta_y: int_attribute(child, names::ATTR_DELTA_Y)?,
            },
        }),
        None => Ok(AssociationLabel::default()),
    }
}

/// Exactly one nested model element -- "there can only be one".
fn single_model_element<'a>(
    element: &'a XmlElement,
    model_name: &str,
    owner_id: &ShapeId,
) -> Result<&'a XmlElement> {
    let mut found = element.children_named(model_name);
    match (found.next(), found.next()) {
        (Some(model), None) => Ok(model),
        (None, _) => Err(XmlError::ModelCardinality {
            owner_id: owner_id.as_str().to_string(),
            count: 0,
        }),
        (Some(_), Some(_)) => Err(XmlError::ModelCardinality {
            owner_id: owner_id.as_str().to_string(),
            count: element.children_named(model_name).count(),
        }),
    }
}

fn resolve(index: &HashSet<String>, link_id: &ShapeId, referenced: &ShapeId) -> Result<()> {
    if index.contains(referenced.as_str()) {
        Ok(())
    } else {
        Err(XmlError::UnresolvedReference {
            link_id: link_id.as_str().to_string(),
            missing: referenced.as_str().to_string(),
        })
    }
}

fn require_attribute<'a>(element: &'a XmlElement, attribute: &'static str) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| XmlError::MissingAttribute {
            element: element.name().to_string(),
            attribute,
        })
}

fn optional_attribute(element: &XmlElement, attribute: &str) -> String {
    element.attribute(attribute).unwrap_or_default().to_string()
}

fn int_attribute(element: &XmlElement, attribute: &'static str) -> Result<i32> {
    let value = require_attribute(element, attribute)?;
    value
        .parse()
        .map_err(|_| XmlError::InvalidAttribute {
            element: element.name().to_string(),
            attribute,
            value: value.to_string(),
        })
}

fn float_attribute(element: &XmlElement, attribute: &'static str) -> Result<f64> {
    let value = require_attribute(element, attribute)?;
    value
        .parse()
        .map_err(|_| XmlError::InvalidAttribute {
            element: element.name().to_string(),
            attribute,
            value: value.to_string(),
        })
}

fn model_id_attribute(element: &XmlElement) -> Result<ModelId> {
    let value = require_attribute(element, names::ATTR_ID)?;
    value
        .parse::<u32>()
        .map(ModelId::new)
        .map_err(|_| XmlError::InvalidAttribute {
            element: element.name().to_string(),
            attribute: names::ATTR_ID,
            value: value.to_string(),
        })
}

fn bool_attribute(element: &XmlElement, attribute: &'static str) -> Result<bool> {
    let value = require_attribute(element, attribute)?;
    match value {
        "True" => Ok(true),
        "False" => Ok(false),
        _ => Err(XmlError::InvalidAttribute {
            element: element.name().to_string(),
            attribute,
            value: value.to_string(),
        }),
    }
}

fn tri_state_attribute(element: &XmlElement, attribute: &'static str) -> Result<DisplayTriState> {
    let value = require_attribute(element, attribute)?;
    DisplayTriState::from_label(value).ok_or_else(|| XmlError::InvalidAttribute {
        element: element.name().to_string(),
        attribute,
        value: value.to_string(),
    })
}

fn visibility_attribute(element: &XmlElement) -> Result<Visibility> {
    let value = require_attribute(element, names::ATTR_VISIBILITY)?;
    Visibility::from_label(value).ok_or_else(|| XmlError::InvalidAttribute {
        element: element.name().to_string(),
        attribute: names::ATTR_VISIBILITY,
        value: value.to_string(),
    })
}

fn attachment_side_attribute(element: &XmlElement) -> Result<AttachmentSide> {
    let value = require_attribute(element, names::ATTR_ATTACHMENT_SIDE)?;
    AttachmentSide::from_label(value).ok_or_else(|| XmlError::InvalidAttribute {
        element: element.name().to_string(),
        attribute: names::ATTR_ATTACHMENT_SIDE,
        value: value.to_string(),
    })
}
