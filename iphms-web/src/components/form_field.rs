use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub oninput: Callback<String>,
    #[prop_or_default]
    pub onblur: Option<Callback<()>>,
}

/// Labelled input with its validation message underneath.
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let oninput = {
        let on_change = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(input.value());
            }
        })
    };
    let onblur = props
        .onblur
        .clone()
        .map(|on_blur| Callback::from(move |_: FocusEvent| on_blur.emit(())));

    html! {
        <div class="form-control">
            <label class="label" for={props.id.clone()}>
                <span class="label-text">{ props.label.clone() }</span>
            </label>
            <input
                id={props.id.clone()}
                class={classes!("input", "input-bordered", props.error.is_some().then_some("input-error"))}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
                {onblur}
            />
            if let Some(error) = props.error.clone() {
                <label class="label">
                    <span class="label-text-alt text-error">{ error }</span>
                </label>
            }
        </div>
    }
}
