//! The static allow-list: which tables the gateway operates on, with an
//! explicit schema per table.
//!
//! Each table carries its column specs (semantic kind + required flag), its
//! id column, and two capability flags that replace dispatch-by-table-name
//! conditionals: `cascade_delete` (deleting a row first removes dependents)
//! and `compound_create` (creation is a multi-row operation owned by a
//! dedicated service, not a plain INSERT).

/// Semantic kind of a gateway column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

/// One column of an allow-listed table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Schema and capabilities of one allow-listed table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub id_column: &'static str,
    pub fields: &'static [FieldSpec],
    pub cascade_delete: bool,
    pub compound_create: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

const BRANCHES: TableSpec = TableSpec {
    name: "branches",
    id_column: "id",
    fields: &[
        required("id", FieldKind::Integer),
        required("name", FieldKind::Text),
        required("address", FieldKind::Text),
        required("phone", FieldKind::Text),
        required("city", FieldKind::Text),
    ],
    cascade_delete: false,
    compound_create: false,
};

const PRODUCTS: TableSpec = TableSpec {
    name: "products",
    id_column: "id",
    fields: &[
        required("id", FieldKind::Integer),
        required("name", FieldKind::Text),
        required("brand", FieldKind::Text),
        required("price", FieldKind::Float),
    ],
    // Deleting a product removes its inventory rows first; creating one
    // seeds inventory, which the provisioning service owns.
    cascade_delete: true,
    compound_create: true,
};

const INVENTORY: TableSpec = TableSpec {
    name: "inventory_levels",
    id_column: "product_id",
    fields: &[
        required("branch_id", FieldKind::Integer),
        required("product_id", FieldKind::Integer),
        required("quantity", FieldKind::Integer),
    ],
    cascade_delete: false,
    compound_create: false,
};

const CLIENTS: TableSpec = TableSpec {
    name: "clients",
    id_column: "id",
    fields: &[
        required("id", FieldKind::Integer),
        required("name", FieldKind::Text),
        optional("address", FieldKind::Text),
        optional("phone", FieldKind::Text),
        required("email", FieldKind::Text),
        required("branch_id", FieldKind::Integer),
    ],
    cascade_delete: false,
    compound_create: false,
};

const EMPLOYEES: TableSpec = TableSpec {
    name: "employees",
    id_column: "id",
    fields: &[
        required("id", FieldKind::Integer),
        required("name", FieldKind::Text),
        optional("address", FieldKind::Text),
        optional("phone", FieldKind::Text),
        required("email", FieldKind::Text),
        required("branch_id", FieldKind::Integer),
    ],
    cascade_delete: false,
    compound_create: false,
};

const INVOICES: TableSpec = TableSpec {
    name: "invoices",
    id_column: "id",
    fields: &[
        required("id", FieldKind::Integer),
        required("date", FieldKind::Text),
        required("total", FieldKind::Float),
        required("client_id", FieldKind::Integer),
        required("branch_id", FieldKind::Integer),
    ],
    cascade_delete: false,
    compound_create: false,
};

const INVOICE_LINES: TableSpec = TableSpec {
    name: "invoice_lines",
    id_column: "invoice_id",
    fields: &[
        required("invoice_id", FieldKind::Integer),
        required("product_id", FieldKind::Integer),
        required("branch_id", FieldKind::Integer),
        required("quantity", FieldKind::Integer),
        required("unit_price", FieldKind::Float),
        required("subtotal", FieldKind::Float),
    ],
    cascade_delete: false,
    compound_create: false,
};

/// The fixed set of tables the gateway will touch. Anything else fails
/// `AccessDenied` before any SQL is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedTable {
    Branches,
    Products,
    Inventory,
    Clients,
    Employees,
    Invoices,
    InvoiceLines,
}

impl AllowedTable {
    /// Every allow-listed table, in sidebar order.
    pub const ALL: [Self; 7] = [
        Self::Branches,
        Self::Products,
        Self::Inventory,
        Self::Clients,
        Self::Employees,
        Self::Invoices,
        Self::InvoiceLines,
    ];

    /// Resolves a table name (case-insensitive) against the allow-list.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.spec().name.eq_ignore_ascii_case(name))
    }

    /// The static schema and capabilities of this table.
    #[must_use]
    pub const fn spec(self) -> &'static TableSpec {
        match self {
            Self::Branches => &BRANCHES,
            Self::Products => &PRODUCTS,
            Self::Inventory => &INVENTORY,
            Self::Clients => &CLIENTS,
            Self::Employees => &EMPLOYEES,
            Self::Invoices => &INVOICES,
            Self::InvoiceLines => &INVOICE_LINES,
        }
    }

    /// Looks up one column spec by name.
    #[must_use]
    pub fn column(self, name: &str) -> Option<&'static FieldSpec> {
        self.spec().fields.iter().find(|f| f.name == name)
    }
}
