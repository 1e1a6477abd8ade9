//! Column, cell content and group types for table display.

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How much room a column takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSize {
    /// Expand to take the remaining width.
    Fill,
    /// Shrink to the content; never wraps.
    #[default]
    Minimum,
}

/// Displayable content: plain text or a host-defined node.
///
/// The table never inspects nodes; it only moves them into the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<N = String> {
    Text(String),
    Node(N),
}

impl<N> Content<N> {
    /// The text, if this is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Node(_) => None,
        }
    }
}

impl<N> From<&str> for Content<N> {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl<N> From<String> for Content<N> {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// A row is one content value per column position.
pub type Row<N = String> = Vec<Content<N>>;

/// Column configuration.
///
/// The key of a sortable column names a field the data source can order
/// by (never the row identity); it is what ends up in
/// [`LoadRequest::sort_by`](super::LoadRequest::sort_by). Keys of
/// non-sortable columns are free-form and only identify the column.
///
/// # Examples
///
/// ```
/// use pagetable::table::{Alignment, Column, ColumnSize};
///
/// let columns: Vec<Column> = vec![
///     Column::sortable("name", "Name").size(ColumnSize::Fill),
///     Column::sortable("age", "Age").align(Alignment::Right),
///     Column::plain("actions", ""),
/// ];
/// assert!(columns[0].sortable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column<N = String> {
    /// Field identifier
    pub key: String,
    /// Header content
    pub label: Content<N>,
    /// Whether header activation sorts by this column
    pub sortable: bool,
    /// Horizontal alignment of header and cells
    pub align: Alignment,
    /// Width hint
    pub size: ColumnSize,
}

impl<N> Column<N> {
    /// Create a sortable column.
    pub fn sortable(key: impl Into<String>, label: impl Into<Content<N>>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            align: Alignment::default(),
            size: ColumnSize::default(),
        }
    }

    /// Create a column that cannot be sorted by.
    pub fn plain(key: impl Into<String>, label: impl Into<Content<N>>) -> Self {
        Self {
            sortable: false,
            ..Self::sortable(key, label)
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the column size hint.
    pub fn size(mut self, size: ColumnSize) -> Self {
        self.size = size;
        self
    }
}

/// A named cluster of rows rendered under a shared header.
///
/// `rows` are indices into the table data. While groups are set, only rows
/// listed in some group are displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<N = String> {
    pub key: String,
    pub header: Content<N>,
    pub actions: Option<Content<N>>,
    pub rows: Vec<usize>,
}

impl<N> Group<N> {
    /// Create a group with a header and member rows.
    pub fn new(key: impl Into<String>, header: impl Into<Content<N>>, rows: Vec<usize>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            actions: None,
            rows,
        }
    }

    /// Attach action content shown at the end of the group header.
    pub fn actions(mut self, actions: impl Into<Content<N>>) -> Self {
        self.actions = Some(actions.into());
        self
    }
}
