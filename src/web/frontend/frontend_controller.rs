use dto::wizard::BURSARY_FORM_TOTAL_STEPS;
use rocket::Request;
use rocket_dyn_templates::{Template, context};
use serde::Serialize;

#[derive(Serialize)]
struct FormField {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    required: bool,
}

#[derive(Serialize)]
struct FormStep {
    number: usize,
    title: &'static str,
    fields: Vec<FormField>,
}

const fn field(name: &'static str, label: &'static str, input_type: &'static str) -> FormField {
    FormField {
        name,
        label,
        input_type,
        required: true,
    }
}

/// Steps of the bursary application form, in display order.
fn application_form_steps() -> Vec<FormStep> {
    let steps = [
        (
            "Personal Details",
            vec![
                field("full_name", "Full name", "text"),
                field("email", "Email", "email"),
                field("phone", "Phone number", "tel"),
                field("national_id", "National ID or birth certificate number", "text"),
            ],
        ),
        (
            "Education",
            vec![
                field("institution_name", "Institution", "text"),
                field("admission_number", "Admission number", "text"),
                field("course", "Course or class", "text"),
            ],
        ),
        (
            "Family Background",
            vec![
                field("guardian_name", "Parent or guardian name", "text"),
                field("guardian_phone", "Parent or guardian phone number", "tel"),
                FormField {
                    required: false,
                    ..field("siblings_in_school", "Siblings in school", "number")
                },
            ],
        ),
        (
            "Bursary Request",
            vec![
                field("amount", "Amount requested (KSh)", "number"),
                field("ward", "Ward", "text"),
            ],
        ),
        ("Review & Submit", vec![]),
    ];

    debug_assert_eq!(BURSARY_FORM_TOTAL_STEPS as usize, steps.len());
    (1..)
        .zip(steps)
        .map(|(number, (title, fields))| FormStep {
            number,
            title,
            fields,
        })
        .collect()
}

#[get("/")]
pub async fn application_form() -> Template {
    Template::render(
        "bursary-application-form",
        context! {
            title: "Bursary Application",
            steps: application_form_steps(),
        },
    )
}

#[get("/success")]
pub async fn success() -> Template {
    Template::render(
        "success",
        context! {
            title: "Application Submitted"
        },
    )
}

#[get("/status")]
pub async fn application_status() -> Template {
    Template::render(
        "status",
        context! {
            title: "Application Status"
        },
    )
}

#[catch(404)]
pub async fn not_found(req: &Request<'_>) -> Template {
    Template::render(
        "error/404",
        context! {
            title: "Page not found",
            uri: req.uri()
        },
    )
}
