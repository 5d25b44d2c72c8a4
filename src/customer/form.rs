//! The shared customer form used by the add page, the inline add form on the
//! list page, and the edit page.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    customer::{CustomerName, MemberNumber, NewCustomer},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    member_tier::TIER_CHOICES,
};

/// The format used for date inputs and date columns, e.g. "1990-05-01".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Form data for customer creation and editing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFormData {
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    #[serde(default)]
    pub interests: String,
}

impl CustomerFormData {
    /// Pre-populate the form with a stored customer's fields.
    pub(crate) fn from_customer(customer: &crate::customer::Customer) -> Self {
        Self {
            name: customer.name.as_ref().to_string(),
            date_of_birth: customer
                .date_of_birth
                .format(DATE_FORMAT)
                .unwrap_or_default(),
            member_number: customer.member_number.as_ref().to_string(),
            interests: customer.interests.clone().unwrap_or_default(),
        }
    }
}

/// Convert submitted form data into a validated [NewCustomer].
///
/// The form rules are stricter than the API's: the name must be at least two
/// characters and the member tier must be one of the known tiers. The
/// future-date rule only applies when `reject_future_date` is set; the add
/// form passes `true`, the edit form `false`.
pub(crate) fn parse_customer_form(
    form_data: &CustomerFormData,
    reject_future_date: bool,
) -> Result<NewCustomer, Error> {
    let name = form_data.name.trim();

    if name.is_empty() {
        return Err(Error::EmptyCustomerName);
    }

    if name.chars().count() < 2 {
        return Err(Error::NameTooShort);
    }

    let date_of_birth = Date::parse(form_data.date_of_birth.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(form_data.date_of_birth.clone()))?;

    if reject_future_date && date_of_birth > OffsetDateTime::now_utc().date() {
        return Err(Error::FutureDateOfBirth(date_of_birth));
    }

    let member_number = form_data.member_number.trim();

    if !TIER_CHOICES
        .iter()
        .any(|(number, _)| number.to_string() == member_number)
    {
        return Err(Error::InvalidMemberTier(form_data.member_number.clone()));
    }

    let interests = form_data.interests.trim();
    let interests = if interests.is_empty() {
        None
    } else {
        Some(interests.to_string())
    };

    Ok(NewCustomer {
        name: CustomerName::new_unchecked(name),
        date_of_birth,
        member_number: MemberNumber::new(member_number),
        interests,
    })
}

/// How the customer form submits its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormMethod {
    Post,
    Put,
}

/// The inputs to [customer_form_view].
pub(crate) struct CustomerFormView<'a> {
    /// The endpoint the form submits to.
    pub submit_endpoint: &'a str,
    pub method: FormMethod,
    pub submit_label: &'a str,
    pub values: &'a CustomerFormData,
    pub error_message: &'a str,
    /// When set, the date input rejects later dates client-side. The add
    /// form passes today's date; the edit form leaves it unset.
    pub max_date_of_birth: Option<&'a str>,
}

/// Render the customer form.
///
/// The submit button is disabled while a submission is in flight, and
/// validation failures re-render the form in place via `hx-swap`.
pub(crate) fn customer_form_view(form: &CustomerFormView) -> Markup {
    let (post_endpoint, put_endpoint) = match form.method {
        FormMethod::Post => (Some(form.submit_endpoint), None),
        FormMethod::Put => (None, Some(form.submit_endpoint)),
    };

    html! {
        form
            hx-post=[post_endpoint]
            hx-put=[put_endpoint]
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type='submit']"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Full Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    value=(form.values.name)
                    placeholder="Enter customer's full name"
                    required
                    minlength="2"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date_of_birth" class=(FORM_LABEL_STYLE) { "Date of Birth" }

                input
                    id="date_of_birth"
                    type="date"
                    name="date_of_birth"
                    value=(form.values.date_of_birth)
                    max=[form.max_date_of_birth]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="member_number" class=(FORM_LABEL_STYLE) { "Member Tier" }

                select
                    id="member_number"
                    name="member_number"
                    required
                    class=(FORM_SELECT_STYLE)
                {
                    option value="" disabled selected[form.values.member_number.is_empty()]
                    {
                        "Select tier"
                    }

                    @for (number, tier) in TIER_CHOICES {
                        option
                            value=(number)
                            selected[form.values.member_number == number.to_string()]
                        {
                            (tier.label()) " (" (number) ")"
                        }
                    }
                }
            }

            div
            {
                label for="interests" class=(FORM_LABEL_STYLE) { "Interests" }

                input
                    id="interests"
                    type="text"
                    name="interests"
                    value=(form.values.interests)
                    placeholder="e.g., Sports, Technology, Travel"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !form.error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (form.error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (form.submit_label) }
        }
    }
}

/// Today's date in the format used by date inputs.
pub(crate) fn today_form_date() -> String {
    OffsetDateTime::now_utc()
        .date()
        .format(DATE_FORMAT)
        .unwrap_or_default()
}
