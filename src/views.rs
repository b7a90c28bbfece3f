//! Server-rendered pages. Plain string builders over a shared layout; every
//! piece of record data passes through `escape`.

use crate::model::{Course, Student};
use axum::response::Html;

/// Minimal HTML escaping for text nodes and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

/// Landing page: every student with view, update, and delete actions.
pub fn index_page(students: &[Student]) -> Html<String> {
    let mut rows = String::new();
    for s in students {
        rows.push_str(&format!(
            "<tr><td>{roll}</td><td>{first}</td><td>{last}</td>\
             <td><a href=\"/student/{id}\">View</a> \
             <a href=\"/student/{id}/update\">Update</a> \
             <a href=\"/student/{id}/delete\">Delete</a></td></tr>\n",
            roll = escape(&s.roll_number),
            first = escape(&s.first_name),
            last = escape(s.last_name.as_deref().unwrap_or("")),
            id = s.student_id,
        ));
    }
    let body = format!(
        "<h1>Students</h1>\n\
         <table>\n\
         <tr><th>Roll Number</th><th>First Name</th><th>Last Name</th><th>Actions</th></tr>\n\
         {rows}</table>\n\
         <p><a href=\"/student/create\">Add Student</a></p>"
    );
    layout("Students", &body)
}

/// Creation form. All courses are offered as unchecked boxes.
pub fn add_student_page(courses: &[Course]) -> Html<String> {
    let body = format!(
        "<h1>Add Student</h1>\n\
         <form method=\"post\" action=\"/student/create\">\n\
         <p><label>Roll Number <input type=\"text\" name=\"roll\" required></label></p>\n\
         <p><label>First Name <input type=\"text\" name=\"f_name\"></label></p>\n\
         <p><label>Last Name <input type=\"text\" name=\"l_name\"></label></p>\n\
         <fieldset><legend>Courses</legend>\n{boxes}</fieldset>\n\
         <p><button type=\"submit\">Submit</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        boxes = course_checkboxes(courses, &[]),
    );
    layout("Add Student", &body)
}

/// Update form. The roll number is displayed but not editable; boxes for
/// currently enrolled courses come pre-checked.
pub fn update_student_page(student: &Student, courses: &[Course], enrolled: &[i64]) -> Html<String> {
    let body = format!(
        "<h1>Update Student</h1>\n\
         <p>Roll Number: {roll}</p>\n\
         <form method=\"post\" action=\"/student/{id}/update\">\n\
         <p><label>First Name <input type=\"text\" name=\"f_name\" value=\"{first}\"></label></p>\n\
         <p><label>Last Name <input type=\"text\" name=\"l_name\" value=\"{last}\"></label></p>\n\
         <fieldset><legend>Courses</legend>\n{boxes}</fieldset>\n\
         <p><button type=\"submit\">Submit</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        roll = escape(&student.roll_number),
        id = student.student_id,
        first = escape(&student.first_name),
        last = escape(student.last_name.as_deref().unwrap_or("")),
        boxes = course_checkboxes(courses, enrolled),
    );
    layout("Update Student", &body)
}

/// Detail page: one student and the courses it is enrolled in.
pub fn student_page(student: &Student, courses: &[Course]) -> Html<String> {
    let mut items = String::new();
    for c in courses {
        items.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape(&c.course_code),
            escape(&c.course_name),
        ));
    }
    let course_list = if items.is_empty() {
        "<p>Not enrolled in any course.</p>".to_string()
    } else {
        format!("<ul>\n{items}</ul>")
    };
    let body = format!(
        "<h1>{first} {last}</h1>\n\
         <p>Roll Number: {roll}</p>\n\
         <h2>Courses</h2>\n\
         {course_list}\n\
         <p><a href=\"/\">Back</a></p>",
        first = escape(&student.first_name),
        last = escape(student.last_name.as_deref().unwrap_or("")),
        roll = escape(&student.roll_number),
    );
    layout("Student", &body)
}

/// Shown when a creation form reuses a taken roll number.
pub fn exists_page() -> Html<String> {
    layout(
        "Student already exists",
        "<h1>Student already exists</h1>\n\
         <p>A student with this roll number is already on record.</p>\n\
         <p><a href=\"/student/create\">Back</a></p>",
    )
}

/// Generic error page with a workflow-specific message.
pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        "<h1>Error</h1>\n<p>{}</p>\n<p><a href=\"/\">Home</a></p>",
        escape(message),
    );
    layout("Error", &body)
}

/// One checkbox per course, named `courses`, valued `course_{id}`.
fn course_checkboxes(courses: &[Course], enrolled: &[i64]) -> String {
    let mut out = String::new();
    for c in courses {
        let checked = if enrolled.contains(&c.course_id) {
            " checked"
        } else {
            ""
        };
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"courses\" value=\"course_{id}\"{checked}> {code}: {name}</label><br>\n",
            id = c.course_id,
            code = escape(&c.course_code),
            name = escape(&c.course_name),
        ));
    }
    out
}
