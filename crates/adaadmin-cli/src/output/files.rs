//! Renderers for database files and field definition tables.

use adaadmin_api_models::{
    FieldDefinition, FieldTableResponse, FileDetailResponse, FileExtent, FileListResponse,
    SubField,
};

use super::format_count;

const TABLE_RULE: &str =
    "-------------------------------------------------------------------------------";

pub(crate) fn file_list_lines(dbid: u32, reply: &FileListResponse) -> Vec<String> {
    let mut lines = vec![
        format!("Database {dbid:03} files:"),
        String::new(),
        "File  Name                Record count ".to_string(),
        "----  ------------------- ------------ ".to_string(),
    ];
    lines.extend(reply.files.iter().map(|file| {
        let lob = if file.is_lob_root > 0 {
            format!("Lob is {}", file.is_lob_root)
        } else if file.is_lob > 0 {
            format!("Lobfile of {}", file.is_lob)
        } else {
            String::new()
        };
        format!(
            " {:03}  {:<20} {:>10} {lob}",
            file.file_nr,
            file.name,
            format_count(file.record_count)
        )
    }));
    lines
}

fn extent_lines(title: &str, extents: &[FileExtent]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    for extent in extents {
        lines.push(format!(" - First RABN   : {}", format_count(extent.first_rabn)));
        lines.push(format!("   Last RABN    : {}", format_count(extent.last_rabn)));
        lines.push(format!("   Free or Isn  : {}", format_count(extent.free_or_isn)));
    }
    lines
}

pub(crate) fn file_detail_lines(dbid: u32, fnr: u32, reply: &FileDetailResponse) -> Vec<String> {
    let file = &reply.file;
    let row = |label: &str, value: String| format!("{label:<20}: {value}");
    let mut lines = vec![
        String::new(),
        format!("Database {dbid:03} file {fnr:03}:"),
        String::new(),
        row("Name", file.name.clone()),
        row("Number", file.number.to_string()),
        row("Last modification", file.last_modification.clone()),
        row("Flags", file.flags.clone()),
        row("ISN count", format_count(file.isn_cnt)),
        row("Top ISN", format_count(file.top_isn)),
        row("Maximum ISN", format_count(file.max_isn)),
        row("Max.MU Occurence", format_count(file.max_mu_occurence)),
        row("Padding factor ASSO", file.padding_factor_asso.to_string()),
        row("Padding factor DATA", file.padding_factor_data.to_string()),
        row("Max.record length", format_count(file.max_record_length)),
        row("Structure level", file.structure_level.to_string()),
        row("Root file", file.root_file.to_string()),
        row("Lob file", file.lob_file.to_string()),
        row("Record count", format_count(file.record_count)),
        row("Security info", file.security_info.to_string()),
    ];
    lines.extend(extent_lines("AC extents", &file.ac_extents));
    lines.extend(extent_lines("DS extents", &file.ds_extents));
    lines.extend(extent_lines("NI extents", &file.ni_extents));
    lines.extend(extent_lines("UI extents", &file.ui_extents));
    lines
}

fn derived_line(kind: &str, field: &FieldDefinition, parent: &SubField) -> String {
    format!(
        " {kind:<8} I   {:>3} I {:>5} I {:>5}  I {:<17} I {:>3}({:>5},{:>5})",
        field.name, field.length, field.format, field.flags, parent.sub_name, parent.from, parent.to
    )
}

/// Table lines of a single FDT entry; super descriptors span one line per parent.
fn field_lines(field: &FieldDefinition) -> Vec<String> {
    let unknown = SubField::default();
    match field.kind.as_str() {
        "FIELD" => {
            let level = usize::try_from(field.level).unwrap_or_default();
            vec![format!(
                "{}{}{} I {:>3}  I {:>6}  I {:>3}   I {}",
                " ".repeat(level),
                field.level,
                " ".repeat(8_usize.saturating_sub(level)),
                field.name,
                field.length,
                field.format,
                field.flags
            )]
        }
        "PHONETIC" => vec![format!(
            " PHONETIC I   {:>3} I  {:>5}   ",
            field.name, field.flags
        )],
        "COLLATION" => vec![format!(" COLL     I    {:<17} ", field.flags)],
        "SUB" => vec![derived_line(
            "SUB",
            field,
            field.sub_fields.first().unwrap_or(&unknown),
        )],
        "SUPER" => {
            let mut parents = field.sub_fields.iter();
            let mut lines = vec![derived_line(
                "SUPER",
                field,
                parents.next().unwrap_or(&unknown),
            )];
            lines.extend(parents.map(|parent| {
                format!(
                    "          I       I       I        I {:<17} I {:>3}({:>5},{:>5})",
                    " ", parent.sub_name, parent.from, parent.to
                )
            }));
            lines
        }
        _ => vec![format!(
            " PRIMARY       I  {:>3} I {:>6} I {:>3}    I {}",
            field.name, field.length, field.format, field.length
        )],
    }
}

pub(crate) fn field_table_lines(dbid: u32, fnr: u32, reply: &FieldTableResponse) -> Vec<String> {
    let fdt = &reply.fdt;
    let mut lines = vec![
        String::new(),
        format!("Database {dbid:03} file {fnr:03} field definition table:"),
        String::new(),
        format!("Fields : {}", fdt.fields.len()),
        "Field Definition Table:".to_string(),
        String::new(),
        "   Level  I Name I Length I Format I   Options         I Flags   I Encoding".to_string(),
        TABLE_RULE.to_string(),
    ];
    lines.extend(fdt.fields.iter().flat_map(field_lines));
    lines.extend([
        String::new(),
        "Descriptors".to_string(),
        TABLE_RULE.to_string(),
        "   Type   I Name I Length I Format I   Options         I Parent field(s)   Fmt"
            .to_string(),
        TABLE_RULE.to_string(),
    ]);
    lines.extend(fdt.descriptors.iter().flat_map(field_lines));
    if !fdt.referentials.is_empty() {
        lines.extend([
            String::new(),
            "Referential Integrity".to_string(),
            TABLE_RULE.to_string(),
            "\tType   I Name I Refer. I PrimaryI Foreign I Rules".to_string(),
            "\t       I      I file   I  field I  field  I".to_string(),
            TABLE_RULE.to_string(),
        ]);
        lines.extend(fdt.referentials.iter().flat_map(field_lines));
    }
    lines
}
