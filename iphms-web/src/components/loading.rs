use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full animate-fadeIn">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex items-center gap-3">
                <span class="loading loading-spinner text-primary"></span>
                <span>{"Loading"}</span>
            </div>
        </div>
    }
}
