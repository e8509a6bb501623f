use shared::models::{Notice, NoticeKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub notice: Notice,
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
}

fn alert_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "alert-success",
        NoticeKind::Error => "alert-error",
        NoticeKind::Warning => "alert-warning",
        NoticeKind::Info => "alert-info",
    }
}

/// A dismissible notice banner.
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let close = props.on_close.clone().map(|on_close| {
        html! {
            <button class="btn btn-sm btn-ghost" onclick={Callback::from(move |_| on_close.emit(()))}>
                {"✕"}
            </button>
        }
    });

    html! {
        <div role="alert" class={classes!("alert", alert_class(props.notice.kind), "mb-4")}>
            <span>{ props.notice.text.clone() }</span>
            { for close }
        </div>
    }
}
