//! DTO → descriptor conversion with validation.

use crate::model::{ClassKind, FirstParameter};
use crate::name::{ClassName, NameError};
use crate::type_ref::{TypeError, TypeRef};
use crate::types::Location;

use super::dto::{ClassDto, MethodDto, ParameterDto, SnapshotDto};
use super::{ClassDescriptor, DeclaredMethod, Visibility};

/// Errors during DTO → descriptor conversion.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// A name field is invalid.
    #[error("{context}: {source}")]
    #[diagnostic(code(class_lint::snapshot::name))]
    Name {
        /// Where the error occurred (e.g., "classes[0].implements[1]").
        context: String,
        /// The underlying name error.
        source: NameError,
    },

    /// A type string is invalid.
    #[error("{context}: {source}")]
    #[diagnostic(code(class_lint::snapshot::type_ref))]
    Type {
        /// Where the error occurred.
        context: String,
        /// The underlying type error.
        source: TypeError,
    },

    /// Unknown `kind` string.
    #[error("{context}: unknown kind `{value}`, expected: class, interface, trait")]
    #[diagnostic(code(class_lint::snapshot::kind))]
    UnknownKind {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown `visibility` string.
    #[error("{context}: unknown visibility `{value}`, expected: public, protected, private")]
    #[diagnostic(code(class_lint::snapshot::visibility))]
    UnknownVisibility {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A class declares more than one parent class.
    #[error("{context}: a class can extend at most one class")]
    #[diagnostic(
        code(class_lint::snapshot::multiple_parents),
        help("only interfaces may list several parents in `extends`")
    )]
    MultipleParents {
        /// Where the error occurred.
        context: String,
    },

    /// A declaration carries relations its kind cannot have.
    #[error("{context}: a {kind} cannot declare `{field}`")]
    #[diagnostic(code(class_lint::snapshot::relation))]
    UnexpectedRelation {
        /// Where the error occurred.
        context: String,
        /// The declaration kind.
        kind: ClassKind,
        /// The offending field.
        field: &'static str,
    },

    /// The same class appears twice (names compare case-insensitively).
    #[error("duplicate class `{0}`")]
    #[diagnostic(
        code(class_lint::snapshot::duplicate),
        help("each fully-qualified name may appear once across all loaded snapshots")
    )]
    DuplicateClass(ClassName),
}

/// Converts a [`SnapshotDto`] into validated descriptors.
///
/// Duplicate detection is left to the index, which also sees other snapshots.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: SnapshotDto) -> Result<Vec<ClassDescriptor>, LoadError> {
    dto.classes
        .into_iter()
        .enumerate()
        .map(|(i, class)| convert_class(class, i))
        .collect()
}

fn convert_class(dto: ClassDto, index: usize) -> Result<ClassDescriptor, LoadError> {
    let ctx = format!("classes[{index}]");
    let name = convert_name(&dto.name, &format!("{ctx}.name"))?;
    let kind = convert_kind(&dto.kind, &ctx)?;

    let extends = dto
        .extends
        .map(super::dto::OneOrMany::into_vec)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(j, n)| convert_name(n, &format!("{ctx}.extends[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let implements = dto
        .implements
        .iter()
        .enumerate()
        .map(|(j, n)| convert_name(n, &format!("{ctx}.implements[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    match kind {
        ClassKind::Class if extends.len() > 1 => {
            return Err(LoadError::MultipleParents { context: ctx });
        }
        ClassKind::Interface if !implements.is_empty() => {
            return Err(LoadError::UnexpectedRelation {
                context: ctx,
                kind,
                field: "implements",
            });
        }
        ClassKind::Trait if !extends.is_empty() || !implements.is_empty() => {
            let field = if extends.is_empty() {
                "implements"
            } else {
                "extends"
            };
            return Err(LoadError::UnexpectedRelation {
                context: ctx,
                kind,
                field,
            });
        }
        _ => {}
    }

    let constructor = dto
        .constructor
        .map(|params| {
            params
                .iter()
                .enumerate()
                .map(|(j, p)| convert_parameter(p, &format!("{ctx}.constructor[{j}]")))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let methods = dto
        .methods
        .iter()
        .enumerate()
        .map(|(j, m)| convert_method(m, &format!("{ctx}.methods[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let location = dto.file.map(|file| Location::new(file, dto.line));

    Ok(ClassDescriptor {
        name,
        kind,
        is_abstract: dto.is_abstract,
        extends,
        implements,
        constructor,
        methods,
        location,
    })
}

fn convert_name(raw: &str, context: &str) -> Result<ClassName, LoadError> {
    ClassName::new(raw).map_err(|source| LoadError::Name {
        context: context.to_string(),
        source,
    })
}

fn convert_kind(raw: &str, context: &str) -> Result<ClassKind, LoadError> {
    match raw {
        "class" => Ok(ClassKind::Class),
        "interface" => Ok(ClassKind::Interface),
        "trait" => Ok(ClassKind::Trait),
        other => Err(LoadError::UnknownKind {
            context: format!("{context}.kind"),
            value: other.to_string(),
        }),
    }
}

fn convert_visibility(raw: &str, context: &str) -> Result<Visibility, LoadError> {
    match raw {
        "public" => Ok(Visibility::Public),
        "protected" => Ok(Visibility::Protected),
        "private" => Ok(Visibility::Private),
        other => Err(LoadError::UnknownVisibility {
            context: format!("{context}.visibility"),
            value: other.to_string(),
        }),
    }
}

fn convert_parameter(dto: &ParameterDto, context: &str) -> Result<Option<TypeRef>, LoadError> {
    dto.type_name
        .as_deref()
        .map(|raw| {
            TypeRef::parse(raw).map_err(|source| LoadError::Type {
                context: format!("{context}.type"),
                source,
            })
        })
        .transpose()
}

fn convert_method(dto: &MethodDto, context: &str) -> Result<DeclaredMethod, LoadError> {
    let visibility = convert_visibility(&dto.visibility, context)?;

    // Only the first parameter matters downstream, but every declared type
    // is still validated so malformed snapshots surface early.
    let mut parameters = dto
        .parameters
        .iter()
        .enumerate()
        .map(|(j, p)| convert_parameter(p, &format!("{context}.parameters[{j}]")))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let first_parameter = match parameters.next() {
        None => FirstParameter::Absent,
        Some(None) => FirstParameter::Untyped,
        Some(Some(ty)) => FirstParameter::Typed(ty),
    };

    Ok(DeclaredMethod {
        name: dto.name.clone(),
        visibility,
        first_parameter,
    })
}
