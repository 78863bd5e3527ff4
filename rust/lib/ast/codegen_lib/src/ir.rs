//! Intermediate Representation (IR) - parsed and validated hierarchy table

/// Everything one generator run emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Outer C++ namespace, also the include-guard prefix.
    pub namespace: String,
    pub hierarchies: Vec<Hierarchy>,
}

/// A family of node types sharing one base class and one visitor interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    pub name: String,
    pub std_includes: Vec<String>,
    pub user_includes: Vec<String>,
    pub variants: Vec<Variant>,
}

/// One concrete node type.
///
/// Field order is constructor-parameter order, member-initializer order and
/// declared-member order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub class_name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Copied verbatim into the generated code.
    pub ty: String,
    pub name: String,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

impl Hierarchy {
    pub fn variant(&self, class_name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.class_name == class_name)
    }
}

impl Schema {
    pub fn hierarchy(&self, name: &str) -> Option<&Hierarchy> {
        self.hierarchies.iter().find(|h| h.name == name)
    }
}
