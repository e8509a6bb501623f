use shared::state::{PageInfo, PageNumber};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub info: PageInfo,
    pub pages: Vec<PageNumber>,
    pub on_page: Callback<usize>,
}

/// Page selector with previous/next buttons and a results summary.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let info = props.info;
    if info.total_items == 0 {
        return html! {};
    }

    let go = |page: usize| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    let buttons = props.pages.iter().map(|number| match *number {
        PageNumber::Page(page) => html! {
            <button
                class={classes!("join-item", "btn", "btn-sm", (page == info.current_page).then_some("btn-active"))}
                onclick={go(page)}
            >
                { page.to_string() }
            </button>
        },
        PageNumber::Ellipsis => html! {
            <button class="join-item btn btn-sm btn-disabled">{"…"}</button>
        },
    });

    html! {
        <div class="flex flex-col sm:flex-row items-center justify-between gap-2 mt-4">
            <span class="text-sm">
                { format!(
                    "Showing {} to {} of {} results",
                    info.first_item_index + 1,
                    info.last_item_index,
                    info.total_items
                ) }
            </span>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled={!info.has_previous_page}
                    onclick={go(info.current_page.saturating_sub(1))}
                >
                    {"«"}
                </button>
                { for buttons }
                <button
                    class="join-item btn btn-sm"
                    disabled={!info.has_next_page}
                    onclick={go(info.current_page + 1)}
                >
                    {"»"}
                </button>
            </div>
        </div>
    }
}
