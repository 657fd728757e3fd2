#![allow(dead_code)]

use smartsheet_core::{
    register, BooleanField, EnumeratedList, EnumeratedValue, Enumeration, FieldContainer, Model,
    NumberField, StringField, TimestampField, TypedList, TypedObject,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    TextNumber,
    Date,
    Checkbox,
    Picklist,
}

impl Enumeration for ColumnType {
    const SYMBOLS: &'static [Self] = &[
        ColumnType::TextNumber,
        ColumnType::Date,
        ColumnType::Checkbox,
        ColumnType::Picklist,
    ];

    fn name(&self) -> &'static str {
        match self {
            ColumnType::TextNumber => "TEXT_NUMBER",
            ColumnType::Date => "DATE",
            ColumnType::Checkbox => "CHECKBOX",
            ColumnType::Picklist => "PICKLIST",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub email: StringField,
    pub name: StringField,
}

impl Model for User {
    const TYPE_NAME: &'static str = "User";
    const FIELDS: &'static [&'static str] = &["email", "name"];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer> {
        let field: &dyn FieldContainer = match name {
            "email" => &self.email,
            "name" => &self.name,
            _ => return None,
        };
        Some(field)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer> {
        let field: &mut dyn FieldContainer = match name {
            "email" => &mut self.email,
            "name" => &mut self.name,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: NumberField,
    pub title: StringField,
    pub column_type: EnumeratedValue<ColumnType>,
    pub options: TypedList,
    pub primary: BooleanField,
    pub system_column_type: StringField,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: NumberField::new(),
            title: StringField::new(),
            column_type: EnumeratedValue::new(),
            options: TypedList::of::<String>(),
            primary: BooleanField::new(),
            system_column_type: StringField::with_accept(["AUTO_NUMBER", "CREATED_BY"]),
        }
    }
}

impl Model for Column {
    const TYPE_NAME: &'static str = "Column";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "type",
        "options",
        "primary",
        "systemColumnType",
    ];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer> {
        let field: &dyn FieldContainer = match name {
            "id" => &self.id,
            "title" => &self.title,
            "type" => &self.column_type,
            "options" => &self.options,
            "primary" => &self.primary,
            "systemColumnType" => &self.system_column_type,
            _ => return None,
        };
        Some(field)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer> {
        let field: &mut dyn FieldContainer = match name {
            "id" => &mut self.id,
            "title" => &mut self.title,
            "type" => &mut self.column_type,
            "options" => &mut self.options,
            "primary" => &mut self.primary,
            "systemColumnType" => &mut self.system_column_type,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub id: NumberField,
    pub name: StringField,
    pub owner: TypedObject,
    pub columns: TypedList,
    pub modified_at: TimestampField,
    pub column_types: EnumeratedList<ColumnType>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            id: NumberField::new(),
            name: StringField::new(),
            owner: TypedObject::named("User"),
            columns: TypedList::of::<Column>(),
            modified_at: TimestampField::new(),
            column_types: EnumeratedList::new(),
        }
    }
}

impl Model for Sheet {
    const TYPE_NAME: &'static str = "Sheet";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "owner",
        "columns",
        "modifiedAt",
        "columnTypes",
    ];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer> {
        let field: &dyn FieldContainer = match name {
            "id" => &self.id,
            "name" => &self.name,
            "owner" => &self.owner,
            "columns" => &self.columns,
            "modifiedAt" => &self.modified_at,
            "columnTypes" => &self.column_types,
            _ => return None,
        };
        Some(field)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer> {
        let field: &mut dyn FieldContainer = match name {
            "id" => &mut self.id,
            "name" => &mut self.name,
            "owner" => &mut self.owner,
            "columns" => &mut self.columns,
            "modifiedAt" => &mut self.modified_at,
            "columnTypes" => &mut self.column_types,
            _ => return None,
        };
        Some(field)
    }
}

/// Folders nest folders, so the element type is only known by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub name: StringField,
    pub folders: TypedList,
    pub sheets: TypedList,
}

impl Default for Folder {
    fn default() -> Self {
        Self {
            name: StringField::new(),
            folders: TypedList::named("Folder"),
            sheets: TypedList::named("Sheet"),
        }
    }
}

impl Model for Folder {
    const TYPE_NAME: &'static str = "Folder";
    const FIELDS: &'static [&'static str] = &["name", "folders", "sheets"];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer> {
        let field: &dyn FieldContainer = match name {
            "name" => &self.name,
            "folders" => &self.folders,
            "sheets" => &self.sheets,
            _ => return None,
        };
        Some(field)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer> {
        let field: &mut dyn FieldContainer = match name {
            "name" => &mut self.name,
            "folders" => &mut self.folders,
            "sheets" => &mut self.sheets,
            _ => return None,
        };
        Some(field)
    }
}

pub fn register_models() {
    register::<User>();
    register::<Column>();
    register::<Sheet>();
    register::<Folder>();
}
