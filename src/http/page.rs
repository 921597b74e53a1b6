//! Server-rendered index page.

use crate::db::{Course, Student};
use std::fmt::Write;

pub const TITLE: &str = "Student Course Enrollment System";

/// Render the index page listing courses and students, with enroll and
/// drop forms posting to the JSON endpoints.
pub fn render(courses: &[Course], students: &[Student]) -> String {
    let mut html = String::with_capacity(2048);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{TITLE}</title>\n</head>\n<body>\n<h1>{TITLE}</h1>\n"
    );

    html.push_str("<h2>Courses</h2>\n<ul>\n");
    for course in courses {
        let _ = writeln!(
            html,
            "<li><a href=\"/course/{id}/students\">{name}</a> (id {id})</li>",
            id = course.id,
            name = escape(&course.name)
        );
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Students</h2>\n<ul>\n");
    for student in students {
        let _ = writeln!(
            html,
            "<li>{name} (id {id})</li>",
            id = student.id,
            name = escape(&student.name)
        );
    }
    html.push_str("</ul>\n");

    for (action, label) in [("/enroll", "Enroll"), ("/drop", "Drop")] {
        let _ = writeln!(html, "<form method=\"post\" action=\"{action}\">");
        html.push_str("<select name=\"student_id\">\n");
        for student in students {
            let _ = writeln!(
                html,
                "<option value=\"{}\">{}</option>",
                student.id,
                escape(&student.name)
            );
        }
        html.push_str("</select>\n<select name=\"course_id\">\n");
        for course in courses {
            let _ = writeln!(
                html,
                "<option value=\"{}\">{}</option>",
                course.id,
                escape(&course.name)
            );
        }
        let _ = writeln!(html, "</select>\n<button type=\"submit\">{label}</button>\n</form>");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
