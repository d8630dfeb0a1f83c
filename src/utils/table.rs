/// A simple text-based table generator for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    placeholder: Option<String>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let col_widths = headers.iter().map(|h| display_width(h)).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            placeholder: None,
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<String>) {
        // Update column widths if needed
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(display_width(col));
            }
        }

        self.rows.push(row);
    }

    /// Text shown in place of the rows when the table has none
    pub fn set_placeholder(&mut self, text: &str) {
        self.placeholder = Some(text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a formatted string
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        let separator = self.render_separator();
        output.push_str(&separator);
        output.push('\n');

        if self.rows.is_empty() {
            if let Some(text) = &self.placeholder {
                let total = display_width(&separator);
                let pad = total.saturating_sub(display_width(text)) / 2;
                output.push_str(&" ".repeat(pad));
                output.push_str(text);
                output.push('\n');
            }
        }

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let pad = self.col_widths[i].saturating_sub(display_width(col));
                line.push_str(col);
                if i < row.len() - 1 {
                    line.push_str(&" ".repeat(pad));
                    line.push_str(" | ");
                }
            }
        }
        line
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}
